use crate::block::Block;
use crate::indexed_header::IndexedBlockHeader;
use crate::indexed_transaction::IndexedTransaction;
use crate::merkle_root::merkle_root;
use bitcrypto::SHA256D;
use ser::{Deserializable, Error as ReaderError, Reader, Serializable};
use std::{cmp, io};

#[derive(Debug, Clone)]
pub struct IndexedBlock {
	pub header: IndexedBlockHeader,
	pub transactions: Vec<IndexedTransaction>,
}

impl From<Block> for IndexedBlock {
	fn from(block: Block) -> Self {
		Self::from_raw(block)
	}
}

impl cmp::PartialEq for IndexedBlock {
	fn eq(&self, other: &Self) -> bool {
		self.header.hash == other.header.hash
	}
}

impl IndexedBlock {
	pub fn new(header: IndexedBlockHeader, transactions: Vec<IndexedTransaction>) -> Self {
		IndexedBlock { header, transactions }
	}

	/// Explicit conversion of the raw Block into IndexedBlock.
	///
	/// Hashes block header + transactions.
	pub fn from_raw(block: Block) -> Self {
		let Block {
			block_header,
			transactions,
		} = block;
		Self::new(
			IndexedBlockHeader::from_raw(block_header),
			transactions.into_iter().map(IndexedTransaction::from_raw).collect(),
		)
	}

	pub fn hash(&self) -> &SHA256D {
		&self.header.hash
	}

	pub fn to_raw_block(self) -> Block {
		Block::new(self.header.raw, self.transactions.into_iter().map(|tx| tx.raw).collect())
	}

	pub fn size(&self) -> usize {
		let header_size = self.header.raw.serialized_size();
		let txs_size = self.transactions.iter().map(|tx| tx.raw.serialized_size()).sum::<usize>();
		header_size + txs_size
	}

	pub fn merkle_root(&self) -> SHA256D {
		merkle_root(&self.transactions.iter().map(|tx| tx.hash).collect::<Vec<SHA256D>>())
	}
}

impl Deserializable for IndexedBlock {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		let header = reader.read()?;
		let transactions = reader.read_list()?;

		Ok(IndexedBlock { header, transactions })
	}
}
