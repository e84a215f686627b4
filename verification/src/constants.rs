/// Number of blocks DarkGravityWave averages over.
pub const DGW_PAST_BLOCKS: u32 = 24;

/// Capacity of the bee population graph.
pub const BEE_POP_GRAPH_SIZE: usize = 1024 * 40;
