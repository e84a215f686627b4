use crate::BlockRef;
use bitcrypto::SHA256D;
use chain::{IndexedBlock, IndexedBlockHeader};

pub trait BlockHeaderProvider {
	/// resolves header by block reference (number/hash)
	fn block_header(&self, block_ref: BlockRef) -> Option<IndexedBlockHeader>;
}

pub trait BlockProvider: BlockHeaderProvider {
	/// resolves hash by block number
	fn block_hash(&self, number: u32) -> Option<SHA256D>;

	/// resolves block number by block hash
	fn block_number(&self, hash: &SHA256D) -> Option<u32>;

	/// resolves deserialized block body by block reference (number/hash);
	/// `None` also models a pruned block whose data is gone
	fn block(&self, block_ref: BlockRef) -> Option<IndexedBlock>;

	/// returns true if store contains given block
	fn contains_block(&self, block_ref: BlockRef) -> bool {
		self.block_header(block_ref).is_some()
	}
}
