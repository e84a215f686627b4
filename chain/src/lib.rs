extern crate primitives;
extern crate rayon;
extern crate serialization as ser;

pub mod constants;

mod block;
mod block_header;
mod indexed_block;
mod indexed_header;
mod indexed_transaction;
mod merkle_root;
/// `IndexedBlock` extension
mod read_and_hash;
mod transaction;

pub use primitives::{bytes, compact, hash};

pub use crate::block::Block;
pub use crate::block_header::{block_header_hash, BlockHeader, PowType, NUM_BLOCK_TYPES};
pub use crate::merkle_root::{merkle_node_hash, merkle_root};
pub use crate::transaction::{OutPoint, Transaction, TransactionInput, TransactionOutput};

pub use crate::indexed_block::IndexedBlock;
pub use crate::indexed_header::IndexedBlockHeader;
pub use crate::indexed_transaction::IndexedTransaction;
pub use crate::read_and_hash::{HashedData, ReadAndHash};
