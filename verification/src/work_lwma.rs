use chain::{BlockHeader, IndexedBlockHeader, PowType};
use network::ConsensusParams;
use primitives::compact::Compact;
use primitives::U256;
use std::cmp;
use storage::BlockHeaderProvider;

/// Pre-fork headers still carry plain version bits here; meeting one during
/// the window walk means the chain holds too little post-fork history.
const FORK_BOUNDARY_VERSION: u32 = 0x2000_0000;

/// Modified LWMA-3 retarget for one proof-of-work algorithm, in force after
/// the MinotaurX fork. Only non-hive blocks of the requested algorithm take
/// part in the window.
pub fn work_required_lwma(
	parent: &IndexedBlockHeader,
	header: &BlockHeader,
	parent_height: u32,
	pow_type: PowType,
	store: &dyn BlockHeaderProvider,
	consensus: &ConsensusParams,
) -> Compact {
	let pow_limit = consensus.pow_type_limits[pow_type as usize];
	let t = consensus.pow_target_spacing as i64 * 2;
	let n = consensus.lwma_averaging_window as i64;
	let k = n * (n + 1) * t / 2;

	// TESTNET ONLY: allow a minimum difficulty block when no block has been
	// seen for ostensibly ten blocks worth of time. Not safe on mainnet.
	if consensus.allow_min_difficulty_blocks && header.time as i64 > parent.raw.time as i64 + t * 10 {
		trace!(target: "minotaurx", "work_required_lwma: allowing {} pow limit (apparent testnet stall)", pow_type.name());
		return Compact::from_u256(pow_limit);
	}

	// not enough blocks on chain
	if (parent_height as i64) < n {
		trace!(target: "minotaurx", "work_required_lwma: allowing {} pow limit (short chain)", pow_type.name());
		return Compact::from_u256(pow_limit);
	}

	// Walk back to the window start, collecting the most recent n blocks of
	// the wanted algorithm on the way.
	let mut wanted: Vec<IndexedBlockHeader> = Vec::with_capacity(n as usize);
	let mut cursor = parent.clone();
	loop {
		if cursor.raw.version >= FORK_BOUNDARY_VERSION {
			trace!(
				target: "minotaurx",
				"work_required_lwma: allowing {} pow limit (window reached the fork boundary)",
				pow_type.name()
			);
			return Compact::from_u256(pow_limit);
		}

		if cursor.raw.is_hive_mined(consensus.hive_nonce_marker) || cursor.raw.pow_type() != Some(pow_type) {
			cursor = step_back(&cursor, store);
			continue;
		}

		wanted.push(cursor.clone());
		if wanted.len() == n as usize {
			// stay on the oldest wanted block
			break;
		}

		cursor = step_back(&cursor, store);
	}

	// previous timestamp starts at the oldest wanted block
	let mut previous_timestamp = cursor.raw.time as i64;

	let mut sum_weighted_solvetimes: i64 = 0;
	let mut j: i64 = 0;
	let mut avg_target = U256::zero();

	for block in wanted.iter().rev() {
		// Forces every solvetime positive. Must stay in this exact form:
		// a plain lower clamp on solvetime is not an equivalent rewrite,
		// and the +1 keeps a fresh chain off a zero target.
		let this_timestamp = if block.raw.time as i64 > previous_timestamp {
			block.raw.time as i64
		} else {
			previous_timestamp + 1
		};

		// the 6*t ceiling keeps one long solvetime from swinging the window
		let solvetime = cmp::min(6 * t, this_timestamp - previous_timestamp);
		previous_timestamp = this_timestamp;

		// linearly higher weight for more recent solvetimes
		j += 1;
		sum_weighted_solvetimes += solvetime * j;

		let target: U256 = block.raw.bits.into();
		// dividing by k now keeps the final multiply inside 256 bits
		avg_target = avg_target + target / U256::from(n as u64) / U256::from(k as u64);
	}

	let next_target = avg_target.overflowing_mul(U256::from(sum_weighted_solvetimes as u64)).0;

	if next_target > pow_limit {
		trace!(target: "minotaurx", "work_required_lwma: allowing {} pow limit (target too high)", pow_type.name());
		return Compact::from_u256(pow_limit);
	}

	Compact::from_u256(next_target)
}

fn step_back(cursor: &IndexedBlockHeader, store: &dyn BlockHeaderProvider) -> IndexedBlockHeader {
	store
		.block_header(cursor.raw.previous_header_hash.into())
		.expect("the fork boundary check fires before the walk can pass genesis; qed")
}

#[cfg(test)]
mod tests {
	use super::work_required_lwma;
	use bitcrypto::SHA256D;
	use chain::{IndexedBlockHeader, PowType};
	use network::{ConsensusParams, Network};
	use primitives::compact::Compact;
	use primitives::U256;
	use test_data::{block_builder, MemoryStore};

	const SHA_VERSION: u32 = 0x1000_0000;
	const MINOTAURX_VERSION: u32 = 0x1001_0000;

	fn fork_time(consensus: &ConsensusParams) -> u32 {
		consensus.pow_fork_time
	}

	fn build_chain(store: &mut MemoryStore, len: u32, spacing: u32, bits: Compact, version: u32, consensus: &ConsensusParams) -> IndexedBlockHeader {
		let start = fork_time(consensus);
		let mut parent_hash = SHA256D::default();
		let mut last = None;
		for height in 0..len {
			let block = block_builder()
				.time(start + height * spacing)
				.bits(bits)
				.version(version)
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
	fn test_lwma_short_chain_returns_limit() {
		// 50 blocks against a 90-block window
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();
		let parent = build_chain(&mut store, 50, 240, Compact::new(0x1d03ffff), SHA_VERSION, &consensus);

		let header = block_builder().time(parent.raw.time + 240).parent(parent.hash).build().header.raw;
		let work = work_required_lwma(&parent, &header, 49, PowType::Sha256d, &store, &consensus);
		assert_eq!(work, Compact::from_u256(consensus.pow_type_limits[0]));
	}

	#[test]
	fn test_lwma_testnet_stall_returns_limit() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();
		let parent = build_chain(&mut store, 120, 240, Compact::new(0x1d03ffff), MINOTAURX_VERSION, &consensus);

		// candidate arrives 10 * t past the parent
		let header = block_builder()
			.time(parent.raw.time + 240 * 10 + 1)
			.parent(parent.hash)
			.build()
			.header
			.raw;
		let work = work_required_lwma(&parent, &header, 119, PowType::MinotaurX, &store, &consensus);
		assert_eq!(work, Compact::from_u256(consensus.pow_type_limits[1]));
	}

	#[test]
	fn test_lwma_fork_boundary_returns_limit() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();

		// versionbits-era ancestors sit right below the window
		let boundary = build_chain(&mut store, 60, 240, Compact::new(0x1d03ffff), 0x2000_0000, &consensus);
		let start = boundary.raw.time + 240;
		let mut parent_hash = boundary.hash;
		let mut parent = boundary;
		for height in 0..60u32 {
			let block = block_builder()
				.time(start + height * 240)
				.bits(Compact::new(0x1d03ffff))
				.version(SHA_VERSION)
				.parent(parent_hash)
				.coinbase(1000 + height)
				.build();
			parent_hash = block.header.hash;
			parent = block.header.clone();
			store.insert(block);
		}

		let header = block_builder().time(parent.raw.time + 240).parent(parent.hash).build().header.raw;
		// 119 blocks of history, but only 60 are post-fork
		let work = work_required_lwma(&parent, &header, 119, PowType::Sha256d, &store, &consensus);
		assert_eq!(work, Compact::from_u256(consensus.pow_type_limits[0]));
	}

	#[test]
	fn test_lwma_monotone_in_solvetimes() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let bits = Compact::new(0x1d03ffff);

		let mut fast_store = MemoryStore::new();
		let fast_parent = build_chain(&mut fast_store, 120, 120, bits, SHA_VERSION, &consensus);
		let fast_header = block_builder().time(fast_parent.raw.time + 120).parent(fast_parent.hash).build().header.raw;
		let fast: U256 = work_required_lwma(&fast_parent, &fast_header, 119, PowType::Sha256d, &fast_store, &consensus).into();

		let mut slow_store = MemoryStore::new();
		let slow_parent = build_chain(&mut slow_store, 120, 480, bits, SHA_VERSION, &consensus);
		let slow_header = block_builder().time(slow_parent.raw.time + 480).parent(slow_parent.hash).build().header.raw;
		let slow: U256 = work_required_lwma(&slow_parent, &slow_header, 119, PowType::Sha256d, &slow_store, &consensus).into();

		// faster blocks demand a smaller target
		assert!(fast < slow);
	}

	#[test]
	fn test_lwma_skips_other_algo_blocks() {
		// a window full of minotaurx blocks forces the sha walk all the way
		// down to the fork boundary
		let consensus = ConsensusParams::new(Network::Testnet);
		let mut store = MemoryStore::new();

		let boundary = build_chain(&mut store, 1, 240, Compact::new(0x1d03ffff), 0x2000_0000, &consensus);
		let start = boundary.raw.time + 240;
		let mut parent_hash = boundary.hash;
		let mut parent = boundary;
		for height in 0..119u32 {
			let block = block_builder()
				.time(start + height * 240)
				.bits(Compact::new(0x1d03ffff))
				.version(MINOTAURX_VERSION)
				.parent(parent_hash)
				.coinbase(1000 + height)
				.build();
			parent_hash = block.header.hash;
			parent = block.header.clone();
			store.insert(block);
		}

		let header = block_builder().time(parent.raw.time + 240).parent(parent.hash).build().header.raw;
		let work = work_required_lwma(&parent, &header, 119, PowType::Sha256d, &store, &consensus);
		assert_eq!(work, Compact::from_u256(consensus.pow_type_limits[0]));
	}
}
