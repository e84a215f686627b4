use crate::block_header::BlockHeader;
use crate::merkle_root::merkle_root;
use crate::transaction::Transaction;
use bitcrypto::SHA256D;
use ser::{Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::io;

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
	pub block_header: BlockHeader,
	pub transactions: Vec<Transaction>,
}

impl Block {
	pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
		Block {
			block_header: header,
			transactions,
		}
	}

	/// Returns block's merkle root.
	pub fn merkle_root(&self) -> SHA256D {
		let hashes = self.transactions.iter().map(Transaction::hash).collect::<Vec<SHA256D>>();
		merkle_root(&hashes)
	}

	pub fn transactions(&self) -> &[Transaction] {
		&self.transactions
	}

	pub fn header(&self) -> &BlockHeader {
		&self.block_header
	}

	pub fn hash(&self) -> SHA256D {
		self.block_header.hash()
	}
}

impl Serializable for Block {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.block_header).append_list(&self.transactions);
	}
}

impl Deserializable for Block {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(Block {
			block_header: reader.read()?,
			transactions: reader.read_list()?,
		})
	}
}
