use crate::read_and_hash::ReadAndHash;
use crate::transaction::Transaction;
use bitcrypto::SHA256D;
use ser::{Deserializable, Error as ReaderError, Reader};
use std::{cmp, fmt, io};

#[derive(Default, Clone)]
pub struct IndexedTransaction {
	pub hash: SHA256D,
	pub raw: Transaction,
}

impl fmt::Debug for IndexedTransaction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("IndexedTransaction")
			.field("hash", &self.hash)
			.field("raw", &self.raw)
			.finish()
	}
}

impl From<Transaction> for IndexedTransaction {
	fn from(transaction: Transaction) -> Self {
		Self::from_raw(transaction)
	}
}

impl IndexedTransaction {
	pub fn new(hash: SHA256D, transaction: Transaction) -> Self {
		IndexedTransaction { hash, raw: transaction }
	}

	/// Explicit conversion of the raw Transaction into IndexedTransaction.
	///
	/// Hashes transaction contents.
	pub fn from_raw<T>(transaction: T) -> Self
	where
		Transaction: From<T>,
	{
		let transaction = Transaction::from(transaction);
		Self::new(transaction.hash(), transaction)
	}
}

impl cmp::PartialEq for IndexedTransaction {
	fn eq(&self, other: &Self) -> bool {
		self.hash == other.hash
	}
}

impl Deserializable for IndexedTransaction {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		let data = reader.read_and_hash::<Transaction>()?;
		let transaction = IndexedTransaction {
			raw: data.data,
			hash: data.hash,
		};

		Ok(transaction)
	}
}
