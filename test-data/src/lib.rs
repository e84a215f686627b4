//! Builders and an in-memory chain store for consensus tests.

extern crate chain;
extern crate primitives;
extern crate storage;

mod block_builder;
mod memory_store;

pub use crate::block_builder::{block_builder, BlockBuilder};
pub use crate::memory_store::MemoryStore;
