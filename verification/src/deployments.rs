use chain::BlockHeader;
use network::ConsensusParams;

/// MinotaurX+Hive1.2 era test. The fork is a flag day: a block belongs to
/// the multi-algo era when its own timestamp has reached the fork time.
pub fn is_minotaurx_enabled(header: &BlockHeader, consensus: &ConsensusParams) -> bool {
	header.time >= consensus.pow_fork_time
}
