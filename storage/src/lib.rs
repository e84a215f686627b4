//! Read-only view of the block tree and UTXO state consumed by the
//! consensus core. Callers hold whatever lock guards the underlying chain
//! while a walk is in progress.

extern crate bit_vec;
extern crate chain;
extern crate primitives;

mod block_ancestors;
mod block_height;
mod block_provider;
mod block_ref;
mod store;
mod transaction_meta;
mod transaction_provider;

pub use primitives::{bytes, hash};

pub use crate::block_ancestors::BlockAncestors;
pub use crate::block_height::BlockHeight;
pub use crate::block_provider::{BlockHeaderProvider, BlockProvider};
pub use crate::block_ref::BlockRef;
pub use crate::store::{AsSubstore, SharedStore, Store};
pub use crate::transaction_meta::TransactionMeta;
pub use crate::transaction_provider::{TransactionMetaProvider, TransactionOutputProvider};
