use crate::{BlockHeaderProvider, BlockRef};
use chain::IndexedBlockHeader;

/// Iterator over the ancestors of a block, tip-side first. Walking past
/// genesis (or any header the provider does not know) ends the iteration.
pub struct BlockAncestors<'a> {
	block: Option<BlockRef>,
	headers: &'a dyn BlockHeaderProvider,
}

impl<'a> BlockAncestors<'a> {
	pub fn new(block: BlockRef, headers: &'a dyn BlockHeaderProvider) -> Self {
		BlockAncestors {
			block: Some(block),
			headers,
		}
	}
}

impl<'a> Iterator for BlockAncestors<'a> {
	type Item = IndexedBlockHeader;

	fn next(&mut self) -> Option<Self::Item> {
		let result = self.block.take().and_then(|block| self.headers.block_header(block));
		self.block = result.as_ref().map(|header| BlockRef::Hash(header.raw.previous_header_hash));
		result
	}
}
