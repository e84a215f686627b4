use bitcrypto::SHA256D;
use chain::{Block, BlockHeader, IndexedBlock, Transaction, TransactionInput, TransactionOutput};
use primitives::compact::Compact;

pub fn block_builder() -> BlockBuilder {
	BlockBuilder::new()
}

/// Fluent builder for test blocks. Produces an `IndexedBlock` whose merkle
/// root covers the attached transactions.
pub struct BlockBuilder {
	version: u32,
	parent: SHA256D,
	time: u32,
	bits: Compact,
	nonce: u32,
	transactions: Vec<Transaction>,
}

impl Default for BlockBuilder {
	fn default() -> Self {
		BlockBuilder {
			version: 1,
			parent: SHA256D::default(),
			time: 0,
			bits: Compact::new(0x1e0fffff),
			nonce: 0,
			transactions: Vec::new(),
		}
	}
}

impl BlockBuilder {
	pub fn new() -> Self {
		BlockBuilder::default()
	}

	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	pub fn parent(mut self, parent: SHA256D) -> Self {
		self.parent = parent;
		self
	}

	pub fn time(mut self, time: u32) -> Self {
		self.time = time;
		self
	}

	pub fn bits(mut self, bits: Compact) -> Self {
		self.bits = bits;
		self
	}

	pub fn nonce(mut self, nonce: u32) -> Self {
		self.nonce = nonce;
		self
	}

	pub fn transaction(mut self, transaction: Transaction) -> Self {
		self.transactions.push(transaction);
		self
	}

	/// Attaches a minimal coinbase whose scriptSig encodes the given tag,
	/// keeping coinbase txids unique across a built chain.
	pub fn coinbase(self, tag: u32) -> Self {
		let transaction = Transaction {
			version: 1,
			inputs: vec![TransactionInput::coinbase(tag.to_le_bytes().to_vec().into())],
			outputs: vec![TransactionOutput {
				value: 0,
				script_pubkey: vec![0x51].into(),
			}],
			lock_time: 0,
		};
		self.transaction(transaction)
	}

	pub fn build(self) -> IndexedBlock {
		let mut block = Block::new(
			BlockHeader {
				version: self.version,
				previous_header_hash: self.parent,
				merkle_root_hash: Default::default(),
				time: self.time,
				bits: self.bits,
				nonce: self.nonce,
			},
			self.transactions,
		);

		if !block.transactions.is_empty() {
			block.block_header.merkle_root_hash = block.merkle_root();
		}

		IndexedBlock::from_raw(block)
	}
}

#[cfg(test)]
mod tests {
	use super::block_builder;

	#[test]
	fn test_block_builder_links_parent() {
		let parent = block_builder().time(100).coinbase(0).build();
		let child = block_builder().time(101).coinbase(1).parent(parent.header.hash).build();

		assert_eq!(child.header.raw.previous_header_hash, parent.header.hash);
		assert_ne!(parent.header.hash, child.header.hash);
	}
}
