/// Number of satoshis in a single coin.
pub const COIN: u64 = 100_000_000;

/// Base block subsidy, halving every `subsidy_halving_interval` blocks.
pub const INITIAL_BLOCK_REWARD: u64 = 5000 * COIN;
