use chain::IndexedBlockHeader;
use network::ConsensusParams;
use primitives::compact::Compact;
use primitives::U256;
use storage::BlockHeaderProvider;

use crate::deployments::is_minotaurx_enabled;

/// Bee hash target for a hive block following `parent`: an SMA over the
/// most recent hive-mined blocks, retargeted by the frequency hive blocks
/// were actually observed at.
pub fn work_required_hive(parent: &IndexedBlockHeader, store: &dyn BlockHeaderProvider, consensus: &ConsensusParams) -> Compact {
	let pow_limit = consensus.pow_limit_hive;

	let mut bee_hash_target = U256::zero();
	let mut hive_block_count: u32 = 0;
	let mut total_block_count: u32 = 0;

	// step back until enough hive blocks are found, or the era (or chain)
	// runs out
	let mut cursor = parent.clone();
	while hive_block_count < consensus.hive_difficulty_window && is_minotaurx_enabled(&cursor.raw, consensus) {
		let prev = match store.block_header(cursor.raw.previous_header_hash.into()) {
			Some(prev) => prev,
			None => break,
		};

		if cursor.raw.is_hive_mined(consensus.hive_nonce_marker) {
			let target: U256 = cursor.raw.bits.into();
			bee_hash_target = bee_hash_target.overflowing_add(target).0;
			hive_block_count += 1;
		}
		total_block_count += 1;
		cursor = prev;
	}

	// should only happen while the chain is starting
	if hive_block_count < consensus.hive_difficulty_window {
		trace!(target: "hive", "work_required_hive: insufficient hive blocks");
		return Compact::from_u256(pow_limit);
	}

	// average the bee hash targets in the window
	bee_hash_target = bee_hash_target / U256::from(hive_block_count);

	// retarget by the observed hive block frequency
	let target_total_block_count = hive_block_count * consensus.hive_block_spacing_target;
	bee_hash_target = bee_hash_target.overflowing_mul(U256::from(total_block_count)).0;
	bee_hash_target = bee_hash_target / U256::from(target_total_block_count);

	if bee_hash_target > pow_limit {
		bee_hash_target = pow_limit;
	}

	Compact::from_u256(bee_hash_target)
}

#[cfg(test)]
mod tests {
	use super::work_required_hive;
	use bitcrypto::SHA256D;
	use chain::IndexedBlockHeader;
	use network::{ConsensusParams, Network};
	use primitives::compact::Compact;
	use primitives::U256;
	use test_data::{block_builder, MemoryStore};

	const HIVE_BITS: Compact = Compact::new(0x1f07ffff);

	fn build_hive_era_chain(store: &mut MemoryStore, len: u32, hive_every: u32, consensus: &ConsensusParams) -> IndexedBlockHeader {
		let start = consensus.pow_fork_time;
		let mut parent_hash = SHA256D::default();
		let mut last = None;
		for height in 0..len {
			let hive = hive_every != 0 && height % hive_every == 1;
			let block = block_builder()
				.time(start + height * 120)
				.bits(if hive { HIVE_BITS } else { Compact::new(0x1d03ffff) })
				.nonce(if hive { consensus.hive_nonce_marker } else { 0 })
				.parent(parent_hash)
				.coinbase(height)
				.build();
			parent_hash = block.header.hash;
			last = Some(block.header.clone());
			store.insert(block);
		}
		last.expect("len > 0")
	}

	#[test]
	fn test_hive_target_insufficient_hive_blocks() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();
		// no hive blocks at all
		let parent = build_hive_era_chain(&mut store, 50, 0, &consensus);

		let work = work_required_hive(&parent, &store, &consensus);
		assert_eq!(work, Compact::from_u256(consensus.pow_limit_hive));
	}

	#[test]
	fn test_hive_target_observed_spacing_on_target() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();
		// every 2nd block is hive-mined: exactly the target spacing
		let parent = build_hive_era_chain(&mut store, 80, 2, &consensus);

		let work = work_required_hive(&parent, &store, &consensus);

		// 36 hive blocks over 71 scanned: avg * 71 / 72
		let avg: U256 = HIVE_BITS.into();
		let expected = avg * U256::from(71u32) / U256::from(72u32);
		assert_eq!(work, Compact::from_u256(expected));
	}

	#[test]
	fn test_hive_target_scarce_hive_blocks_get_easier() {
		let consensus = ConsensusParams::new(Network::Testnet);

		let mut sparse_store = MemoryStore::new();
		let sparse_parent = build_hive_era_chain(&mut sparse_store, 200, 5, &consensus);
		let sparse: U256 = work_required_hive(&sparse_parent, &sparse_store, &consensus).into();

		let mut dense_store = MemoryStore::new();
		let dense_parent = build_hive_era_chain(&mut dense_store, 200, 2, &consensus);
		let dense: U256 = work_required_hive(&dense_parent, &dense_store, &consensus).into();

		// scarce hive blocks raise (ease) the target
		assert!(sparse > dense);
	}
}
