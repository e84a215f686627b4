use bitcrypto::SHA256D;
use chain::{BlockHeader, IndexedBlockHeader};
use network::ConsensusParams;
use primitives::compact::Compact;
use primitives::U256;
use storage::BlockHeaderProvider;

use crate::deployments::is_minotaurx_enabled;
use crate::work_dgw::work_required_dgw;
use crate::work_hive::work_required_hive;
use crate::work_lwma::work_required_lwma;

/// Returns work required for the candidate header at `height`, selecting
/// the retarget regime from the parent's fork state and the candidate's own
/// header tags: hive bee-target for hive-mined blocks, per-algorithm LWMA
/// in the MinotaurX era, DarkGravityWave after its activation height, the
/// legacy retargeter before that.
pub fn work_required(
	parent_hash: SHA256D,
	header: &BlockHeader,
	height: u32,
	store: &dyn BlockHeaderProvider,
	consensus: &ConsensusParams,
) -> Compact {
	if height == 0 {
		return Compact::from_u256(consensus.pow_limit_sha);
	}

	let parent = store
		.block_header(parent_hash.into())
		.expect("parent header is in the index when work is requested; qed");

	if is_minotaurx_enabled(&parent.raw, consensus) {
		if header.is_hive_mined(consensus.hive_nonce_marker) {
			return work_required_hive(&parent, store, consensus);
		}

		let pow_type = header.pow_type().expect("pow type is validated before difficulty dispatch; qed");
		return work_required_lwma(&parent, header, height - 1, pow_type, store, consensus);
	}

	if height >= consensus.dgw_activation_height {
		return work_required_dgw(&parent, height - 1, store, consensus);
	}

	work_required_btc(&parent, header, height, store, consensus)
}

/// Legacy retargeter, in force below the DarkGravityWave activation height.
fn work_required_btc(
	parent: &IndexedBlockHeader,
	header: &BlockHeader,
	height: u32,
	store: &dyn BlockHeaderProvider,
	consensus: &ConsensusParams,
) -> Compact {
	let pow_limit = Compact::from_u256(consensus.pow_limit_sha);

	if consensus.no_retargeting {
		return parent.raw.bits;
	}

	let interval = consensus.difficulty_adjustment_interval();

	// difficulty of 1 while the chain is shorter than the first averaging window
	if height < interval * 20 {
		return Compact::from_u256(consensus.starting_difficulty);
	}

	// only change once per interval
	if height % interval != 0 {
		if consensus.allow_min_difficulty_blocks {
			// Special difficulty rule for testnet: a block may drop to the
			// pow limit when twice the target spacing has passed without one.
			if header.time > parent.raw.time + consensus.pow_target_spacing * 2 {
				return pow_limit;
			}

			// Return the last non-special-min-difficulty-rules block
			let mut current = parent.clone();
			let mut current_height = height - 1;
			loop {
				if current_height % interval == 0 || current.raw.bits != pow_limit {
					return current.raw.bits;
				}
				current = match store.block_header(current.raw.previous_header_hash.into()) {
					Some(prev) => prev,
					None => return current.raw.bits,
				};
				current_height -= 1;
			}
		}
		return parent.raw.bits;
	}

	// go back by a full averaging window of blocks
	let mut first = parent.clone();
	for _ in 0..interval * 20 - 1 {
		first = store
			.block_header(first.raw.previous_header_hash.into())
			.expect("chain reaches back a full averaging window past an interval boundary; qed");
	}

	work_required_retarget(parent, first.raw.time, consensus)
}

/// One legacy retarget step: scale the parent target by the clamped
/// observed timespan of the averaging window.
fn work_required_retarget(parent: &IndexedBlockHeader, first_block_time: u32, consensus: &ConsensusParams) -> Compact {
	let interval = consensus.difficulty_adjustment_interval() as i64;
	let averaging_interval = interval * 20;
	let averaging_target_timespan = averaging_interval * 120;
	let max_adjust_down = 20; // 20% adjustment down
	let max_adjust_up = 15; // 15% adjustment up
	let min_actual_timespan = averaging_target_timespan * (100 - max_adjust_up) / 100;
	let max_actual_timespan = averaging_target_timespan * (100 + max_adjust_down) / 100;

	let mut actual_timespan = parent.raw.time as i64 - first_block_time as i64;
	if actual_timespan < min_actual_timespan {
		actual_timespan = min_actual_timespan;
	}
	if actual_timespan > max_actual_timespan {
		actual_timespan = max_actual_timespan;
	}

	let mut retarget: U256 = parent.raw.bits.into();
	// target arithmetic wraps at 256 bits
	retarget = retarget.overflowing_mul(U256::from(actual_timespan as u64)).0;
	retarget = retarget / U256::from(averaging_target_timespan as u64);

	if retarget > consensus.pow_limit_sha {
		Compact::from_u256(consensus.pow_limit_sha)
	} else {
		Compact::from_u256(retarget)
	}
}

/// Numeric value of a block hash.
pub fn hash_to_u256(hash: &SHA256D) -> U256 {
	U256::from_little_endian(&hash[..])
}

/// Validates a hash against a compact target within the multi-algo
/// pow-limit envelope.
pub fn check_proof_of_work(hash: &SHA256D, bits: Compact, consensus: &ConsensusParams) -> bool {
	// negative or overflowed targets fail outright
	let target = match bits.to_u256() {
		Ok(target) => target,
		Err(_) => return false,
	};

	if target.is_zero() || target > consensus.max_pow_type_limit() {
		return false;
	}

	hash_to_u256(hash) <= target
}
