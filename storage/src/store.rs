use crate::{BlockHeaderProvider, BlockHeight, BlockProvider, TransactionMetaProvider, TransactionOutputProvider};
use chain::IndexedBlockHeader;
use std::sync::Arc;

/// Blockchain storage interface
pub trait Store: AsSubstore {
	/// get best block
	fn best_block(&self) -> BlockHeight;

	/// get best header
	fn best_header(&self) -> IndexedBlockHeader;
}

/// Allows casting `Arc<Store>` to reference to any substore type
pub trait AsSubstore: BlockProvider + TransactionOutputProvider + TransactionMetaProvider {
	fn as_block_provider(&self) -> &dyn BlockProvider;

	fn as_block_header_provider(&self) -> &dyn BlockHeaderProvider;

	fn as_transaction_output_provider(&self) -> &dyn TransactionOutputProvider;

	fn as_transaction_meta_provider(&self) -> &dyn TransactionMetaProvider;
}

impl<T> AsSubstore for T
where
	T: BlockProvider + TransactionOutputProvider + TransactionMetaProvider,
{
	fn as_block_provider(&self) -> &dyn BlockProvider {
		&*self
	}

	fn as_block_header_provider(&self) -> &dyn BlockHeaderProvider {
		&*self
	}

	fn as_transaction_output_provider(&self) -> &dyn TransactionOutputProvider {
		&*self
	}

	fn as_transaction_meta_provider(&self) -> &dyn TransactionMetaProvider {
		&*self
	}
}

pub type SharedStore = Arc<dyn Store + Send + Sync>;
