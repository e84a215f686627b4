use chain::IndexedBlockHeader;
use network::ConsensusParams;
use primitives::compact::Compact;
use primitives::U256;
use storage::BlockHeaderProvider;

use crate::constants::DGW_PAST_BLOCKS;

/// DarkGravityWave v3 retarget, in force for sha256d blocks from the DGW
/// activation height until the MinotaurX fork.
///
/// Every block with a parent takes part in the target average, hive-mined
/// blocks included.
pub fn work_required_dgw(
	parent: &IndexedBlockHeader,
	parent_height: u32,
	store: &dyn BlockHeaderProvider,
	consensus: &ConsensusParams,
) -> Compact {
	let pow_limit = consensus.pow_limit_sha;

	// need at least past_blocks + 1 blocks on chain
	if parent_height < DGW_PAST_BLOCKS {
		return Compact::from_u256(pow_limit);
	}

	let mut index = parent.clone();
	let mut past_target_avg = U256::zero();

	for count in 1..=DGW_PAST_BLOCKS as u64 {
		let target: U256 = index.raw.bits.into();
		if count == 1 {
			past_target_avg = target;
		} else {
			// running recurrence, not a strict average
			past_target_avg = (past_target_avg.overflowing_mul(U256::from(count)).0 + target) / U256::from(count + 1);
		}

		if count != DGW_PAST_BLOCKS as u64 {
			index = store
				.block_header(index.raw.previous_header_hash.into())
				.expect("chain is at least past_blocks deep here; qed");
		}
	}

	// the window timespan covers past_blocks - 1 solve intervals
	let mut actual_timespan = parent.raw.time as i64 - index.raw.time as i64;
	let target_timespan = DGW_PAST_BLOCKS as i64 * consensus.pow_target_spacing as i64;

	if actual_timespan < target_timespan / 3 {
		actual_timespan = target_timespan / 3;
	}
	if actual_timespan > target_timespan * 3 {
		actual_timespan = target_timespan * 3;
	}

	let mut new_target = past_target_avg.overflowing_mul(U256::from(actual_timespan as u64)).0;
	new_target = new_target / U256::from(target_timespan as u64);

	if new_target > pow_limit {
		new_target = pow_limit;
	}

	Compact::from_u256(new_target)
}
