use crate::TransactionMeta;
use bitcrypto::SHA256D;
use chain::{OutPoint, TransactionOutput};

/// Unspent transaction outputs, as seen at the current chain tip.
pub trait TransactionOutputProvider: Send + Sync {
	/// returns the output if it exists and has not been spent
	fn transaction_output(&self, outpoint: &OutPoint) -> Option<TransactionOutput>;

	/// returns true if the given output was spent by some stored transaction
	fn is_spent(&self, outpoint: &OutPoint) -> bool;
}

/// Transaction location metadata.
pub trait TransactionMetaProvider: Send + Sync {
	/// returns the meta of a stored transaction
	fn transaction_meta(&self, hash: &SHA256D) -> Option<TransactionMeta>;
}
