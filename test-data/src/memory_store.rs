use bitcrypto::SHA256D;
use chain::{IndexedBlock, IndexedBlockHeader, OutPoint, TransactionOutput};
use std::collections::{HashMap, HashSet};
use storage::{
	BlockHeaderProvider, BlockHeight, BlockProvider, BlockRef, Store, TransactionMeta, TransactionMetaProvider,
	TransactionOutputProvider,
};

/// In-memory canonical chain with a UTXO view, for tests.
///
/// Blocks are appended in height order. Spent outputs are tracked the same
/// way the node's UTXO set would see them at the tip.
#[derive(Default)]
pub struct MemoryStore {
	blocks: Vec<IndexedBlock>,
	numbers: HashMap<SHA256D, u32>,
	meta: HashMap<SHA256D, TransactionMeta>,
	pruned: HashSet<u32>,
}

impl MemoryStore {
	pub fn new() -> Self {
		MemoryStore::default()
	}

	/// Appends a block at the next height.
	pub fn insert(&mut self, block: IndexedBlock) {
		let number = self.blocks.len() as u32;

		for (tx_index, tx) in block.transactions.iter().enumerate() {
			let meta = if tx_index == 0 && tx.raw.is_coinbase() {
				TransactionMeta::new_coinbase(number, tx.raw.outputs.len())
			} else {
				TransactionMeta::new(number, tx.raw.outputs.len())
			};
			self.meta.insert(tx.hash, meta);

			for input in &tx.raw.inputs {
				if input.previous_output.is_null() {
					continue;
				}
				if let Some(spent) = self.meta.get_mut(&input.previous_output.hash) {
					spent.note_used(input.previous_output.index as usize);
				}
			}
		}

		self.numbers.insert(block.header.hash, number);
		self.blocks.push(block);
	}

	/// Marks an output spent without a spending block, as if some later
	/// transaction consumed it.
	pub fn spend(&mut self, outpoint: &OutPoint) {
		if let Some(meta) = self.meta.get_mut(&outpoint.hash) {
			meta.note_used(outpoint.index as usize);
		}
	}

	/// Forgets a block body, keeping its header. Models pruned block data.
	pub fn prune(&mut self, number: u32) {
		self.pruned.insert(number);
	}

	/// Drops a transaction's meta, so only a block scan can find it again.
	pub fn forget_transaction(&mut self, hash: &SHA256D) {
		self.meta.remove(hash);
	}

	fn resolve(&self, block_ref: BlockRef) -> Option<u32> {
		match block_ref {
			BlockRef::Number(number) => Some(number),
			BlockRef::Hash(ref hash) => self.numbers.get(hash).copied(),
		}
	}
}

impl BlockHeaderProvider for MemoryStore {
	fn block_header(&self, block_ref: BlockRef) -> Option<IndexedBlockHeader> {
		let number = self.resolve(block_ref)?;
		self.blocks.get(number as usize).map(|block| block.header.clone())
	}
}

impl BlockProvider for MemoryStore {
	fn block_hash(&self, number: u32) -> Option<SHA256D> {
		self.blocks.get(number as usize).map(|block| block.header.hash)
	}

	fn block_number(&self, hash: &SHA256D) -> Option<u32> {
		self.numbers.get(hash).copied()
	}

	fn block(&self, block_ref: BlockRef) -> Option<IndexedBlock> {
		let number = self.resolve(block_ref)?;
		if self.pruned.contains(&number) {
			return None;
		}
		self.blocks.get(number as usize).cloned()
	}
}

impl TransactionOutputProvider for MemoryStore {
	fn transaction_output(&self, outpoint: &OutPoint) -> Option<TransactionOutput> {
		let meta = self.meta.get(&outpoint.hash)?;
		if meta.is_spent(outpoint.index as usize)? {
			return None;
		}

		let block = self.blocks.get(meta.height() as usize)?;
		block
			.transactions
			.iter()
			.find(|tx| tx.hash == outpoint.hash)
			.and_then(|tx| tx.raw.outputs.get(outpoint.index as usize))
			.cloned()
	}

	fn is_spent(&self, outpoint: &OutPoint) -> bool {
		self.meta
			.get(&outpoint.hash)
			.and_then(|meta| meta.is_spent(outpoint.index as usize))
			.unwrap_or(false)
	}
}

impl TransactionMetaProvider for MemoryStore {
	fn transaction_meta(&self, hash: &SHA256D) -> Option<TransactionMeta> {
		self.meta.get(hash).cloned()
	}
}

impl Store for MemoryStore {
	fn best_block(&self) -> BlockHeight {
		let number = self.blocks.len().saturating_sub(1) as u32;
		BlockHeight {
			number,
			hash: self.blocks.last().map(|block| block.header.hash).unwrap_or_default(),
		}
	}

	fn best_header(&self) -> IndexedBlockHeader {
		self.blocks.last().map(|block| block.header.clone()).expect("store is never empty in tests; qed")
	}
}
