use crate::deployments::{Deployment, DeploymentPos, ALWAYS_ACTIVE, NO_TIMEOUT};
use crate::{Magic, Network};
use bitcrypto::{FromStr, SHA256D};
use chain::NUM_BLOCK_TYPES;
use primitives::U256;

#[derive(Debug, Clone)]
/// Parameters that influence chain consensus.
pub struct ConsensusParams {
	/// Network.
	pub network: Network,
	/// Blocks between block-reward halvings.
	pub subsidy_halving_interval: u32,
	/// Block height at which BIP16 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0016.mediawiki
	pub bip16_height: u32,
	/// Block height at which BIP34 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0034.mediawiki
	pub bip34_height: u32,
	/// Hash of the block activating BIP34.
	pub bip34_hash: SHA256D,
	/// Block height at which BIP65 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0065.mediawiki
	pub bip65_height: u32,
	/// Block height at which BIP66 becomes active.
	/// See https://github.com/bitcoin/bips/blob/master/bip-0066.mediawiki
	pub bip66_height: u32,

	/// Highest (easiest) sha256d proof-of-work target.
	pub pow_limit_sha: U256,
	/// Target handed out while the chain is shorter than the first
	/// adjustment window.
	pub starting_difficulty: U256,
	/// Highest (easiest) bee hash target.
	pub pow_limit_hive: U256,
	/// Per-algorithm target limits, indexed by `PowType`.
	pub pow_type_limits: [U256; NUM_BLOCK_TYPES],
	/// Seconds the legacy retargeter aims a full adjustment interval at.
	pub pow_target_timespan: u32,
	/// Target seconds between blocks.
	pub pow_target_spacing: u32,
	/// Testnet-style minimum-difficulty rule.
	pub allow_min_difficulty_blocks: bool,
	/// Difficulty never changes (regtest).
	pub no_retargeting: bool,

	/// Version bits activation threshold.
	pub rule_change_activation_threshold: u32,
	/// Number of blocks with the same set of rules.
	pub miner_confirmation_window: u32,
	/// Height from which DarkGravityWave replaces the legacy retargeter.
	pub dgw_activation_height: u32,
	/// MinotaurX+Hive1.2 fork time; blocks timestamped at or after it are
	/// in the multi-algo era.
	pub pow_fork_time: u32,

	/// BIP9 deployment used for testing purposes only.
	pub testdummy_deployment: Option<Deployment>,
	/// BIP68, BIP112, BIP113 deployment.
	pub csv_deployment: Option<Deployment>,
	/// BIP141, BIP143, BIP147 deployment.
	pub segwit_deployment: Option<Deployment>,
	/// MinotaurX+Hive1.2 deployment.
	pub minotaurx_deployment: Option<Deployment>,

	/// Minimum cost of a bee, used when no more block rewards.
	pub min_bee_cost: u64,
	/// Bee cost is block_reward/bee_cost_factor.
	pub bee_cost_factor: u64,
	/// Unspendable address for bee creation.
	pub bee_creation_address: &'static str,
	/// Community fund address.
	pub hive_community_address: &'static str,
	/// Optionally, donate bct_value/community_contrib_factor to community fund.
	pub community_contrib_factor: u64,
	/// The number of blocks for a new bee to mature.
	pub bee_gestation_blocks: u32,
	/// The number of blocks a bee lives for after maturation.
	pub bee_lifespan_blocks: u32,
	/// Below this height there is no point looking for BCTs.
	pub min_hive_check_block: u32,
	/// Target hive block frequency (1 out of this many blocks should be hivemined).
	pub hive_block_spacing_target: u32,
	/// Observed hive block frequency in Hive 1.1.
	pub hive_block_spacing_target_typical_1_1: u32,
	/// Nonce marker for hivemined blocks.
	pub hive_nonce_marker: u32,

	/// Minimum chainwork scale for hive blocks.
	pub min_k: u32,
	/// Maximum chainwork scale for hive blocks.
	pub max_k: u32,
	/// Hive difficulty at which max chainwork bonus is awarded.
	pub max_hive_diff: f64,
	/// Maximum chainwork scale for PoW blocks.
	pub max_k_pow: u32,
	/// Below this hive difficulty threshold, PoW block chainwork bonus is halved.
	pub pow_split1: f64,
	/// Below this hive difficulty threshold, PoW block chainwork bonus is halved again.
	pub pow_split2: f64,
	/// Maximum hive blocks that can occur consecutively before a PoW block is required.
	pub max_consecutive_hive_blocks: u32,
	/// How many blocks the SMA averages over in hive difficulty adjust.
	pub hive_difficulty_window: u32,
	/// Averaging window size for LWMA diff adjust.
	pub lwma_averaging_window: u32,

	/// The best chain should have at least this much work.
	pub minimum_chain_work: U256,
	/// By default assume that the signatures in ancestors of this block are valid.
	pub default_assume_valid: SHA256D,
	/// Known-good (height, hash) pairs.
	pub checkpoints: Vec<(u32, SHA256D)>,
}

impl ConsensusParams {
	pub fn new(network: Network) -> Self {
		let sha_limit: U256 = "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap();
		let minotaurx_limit: U256 = "000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap();
		let hive_limit: U256 = "0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap();

		match network {
			Network::Mainnet => ConsensusParams {
				network,
				subsidy_halving_interval: 950_000,
				bip16_height: 1,
				bip34_height: 1,
				bip34_hash: SHA256D::from_str("000000003302fe58f139f1d45f3a0a67601d39e63b82bc4918f48b8cd5df6ab0").unwrap(),
				bip65_height: 2_105_603, // future block predicted beginning February 2022
				bip66_height: 800_000,
				pow_limit_sha: sha_limit,
				starting_difficulty: "00000003ffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
				pow_limit_hive: hive_limit,
				pow_type_limits: [sha_limit, minotaurx_limit],
				pow_target_timespan: 8 * 60, // 8 minutes
				pow_target_spacing: 2 * 60,  // 2 minutes
				allow_min_difficulty_blocks: false,
				no_retargeting: false,
				rule_change_activation_threshold: 6048, // 75% of 8064
				miner_confirmation_window: 8064,
				dgw_activation_height: 100_000,
				pow_fork_time: 1_644_645_600, // minotaurx start time
				testdummy_deployment: Some(Deployment {
					name: "testdummy",
					bit: 28,
					start_time: 1_199_145_601, // January 1, 2008
					timeout: 1_230_767_999,    // December 31, 2008
				}),
				csv_deployment: Some(Deployment {
					name: "csv",
					bit: 0,
					start_time: 1_644_645_600,              // Feb 12, 2022
					timeout: 1_644_645_600 + 31_536_000,    // start + 1 year
				}),
				segwit_deployment: Some(Deployment {
					name: "segwit",
					bit: 1,
					start_time: 1_644_645_600,
					timeout: 1_644_645_600 + 31_536_000,
				}),
				minotaurx_deployment: Some(Deployment {
					name: "minotaurx",
					bit: 7,
					start_time: 1_644_645_600,
					timeout: 1_644_645_600 + 31_536_000,
				}),
				min_bee_cost: 10_000,
				bee_cost_factor: 2500,
				bee_creation_address: "MCreateBeeMainXXXXXXXXXXXXXXVQWqkH",
				hive_community_address: "4xscpVDbThrWVk4GD177JqniTvZ8RPa6qo",
				community_contrib_factor: 10,
				bee_gestation_blocks: 30 * 24,
				bee_lifespan_blocks: 30 * 24 * 14,
				min_hive_check_block: 2_105_603,
				hive_block_spacing_target: 2,
				hive_block_spacing_target_typical_1_1: 2,
				hive_nonce_marker: 192,
				min_k: 2,
				max_k: 16,
				max_hive_diff: 0.006,
				max_k_pow: 5,
				pow_split1: 0.005,
				pow_split2: 0.0025,
				max_consecutive_hive_blocks: 2,
				hive_difficulty_window: 36,
				lwma_averaging_window: 90,
				minimum_chain_work: "000000000000000000000000000000000000000000000ac96eea62eb8eaf493d".parse().unwrap(),
				default_assume_valid: SHA256D::from_str("00000000000002a124800233414bbbc58a789290f3fb1eb5352cdfd7033dfa27").unwrap(),
				checkpoints: vec![
					(91_800, SHA256D::from_str("00000000000000f35417a67ff0bb5cec6a1c64d13bb1359ae4a03d2c9d44d900").unwrap()),
					(183_600, SHA256D::from_str("0000000000000787f10fa4a547822f8170f1f182ca0de60ecd2de189471da885").unwrap()),
					(1_148_232, SHA256D::from_str("00000000000000026e94b971fd0e966d9dba98eaf828a7814de2ef333312bb2c").unwrap()),
					(2_036_783, SHA256D::from_str("00000000000002a124800233414bbbc58a789290f3fb1eb5352cdfd7033dfa27").unwrap()),
				],
			},
			Network::Testnet => ConsensusParams {
				network,
				subsidy_halving_interval: 950_000,
				bip16_height: 0, // always enforce BIP16
				bip34_height: 100,
				bip34_hash: SHA256D::from_str("000000095bbba46901bc8b723224e93b127319bb28e163a3d00857c7aef528be").unwrap(),
				bip65_height: 628_001,
				bip66_height: 100_000,
				pow_limit_sha: sha_limit,
				starting_difficulty: "00000003ffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
				pow_limit_hive: hive_limit,
				pow_type_limits: [sha_limit, minotaurx_limit],
				pow_target_timespan: 8 * 60,
				pow_target_spacing: 2 * 60,
				allow_min_difficulty_blocks: true,
				no_retargeting: false,
				rule_change_activation_threshold: 15, // 75% of last 20 blocks
				miner_confirmation_window: 20,
				dgw_activation_height: 10,
				pow_fork_time: 1_639_094_400,
				testdummy_deployment: Some(Deployment {
					name: "testdummy",
					bit: 28,
					start_time: 1_639_090_000,
					timeout: 1_639_090_000 + 315_360,
				}),
				csv_deployment: Some(Deployment {
					name: "csv",
					bit: 0,
					start_time: 1_639_090_000,
					timeout: 1_639_090_000 + 315_360,
				}),
				segwit_deployment: Some(Deployment {
					name: "segwit",
					bit: 1,
					start_time: 1_639_094_400,
					timeout: 1_639_094_400 + 315_360,
				}),
				minotaurx_deployment: Some(Deployment {
					name: "minotaurx",
					bit: 7,
					start_time: 1_639_094_400,
					timeout: 1_639_094_400 + 31_536_000,
				}),
				min_bee_cost: 10_000,
				bee_cost_factor: 2500,
				bee_creation_address: "ccReateBeetestnetXXXXXXXXXXXVPRtyV",
				hive_community_address: "cUr9QKe9f7vk6174C45yyW6CLJ8Qq1MKLL",
				community_contrib_factor: 10,
				bee_gestation_blocks: 40,
				bee_lifespan_blocks: 48 * 24 * 14,
				min_hive_check_block: 628_001,
				hive_block_spacing_target: 2,
				hive_block_spacing_target_typical_1_1: 2,
				hive_nonce_marker: 192,
				min_k: 2,
				max_k: 10,
				max_hive_diff: 0.002,
				max_k_pow: 5,
				pow_split1: 0.001,
				pow_split2: 0.0005,
				max_consecutive_hive_blocks: 2,
				hive_difficulty_window: 36,
				lwma_averaging_window: 90,
				minimum_chain_work: "000000000000000000000000000000000000000000000000005f2e22e5a21778".parse().unwrap(),
				default_assume_valid: SHA256D::from_str("00000000070a1a9e19174cf9b46a3a99ac672e560716bccf50c3087e0c542802").unwrap(),
				checkpoints: vec![
					(1, SHA256D::from_str("00000002a0b59d902c562804e26e28b9208dd766e08867fb896dd5bbed4e9a15").unwrap()),
					(110, SHA256D::from_str("000000031a3c2984813b9f1c842f741759b207bb2408170de536decc8e738652").unwrap()),
					(261, SHA256D::from_str("000000000babe88050bc39ce5aeaa3b002013dc0a812f5d4e073447bf9668502").unwrap()),
					(1999, SHA256D::from_str("0000000002efad4b1cd3160a512c46ba31181194165b0d8f8d68a722536df4f6").unwrap()),
					(558_275, SHA256D::from_str("0000000015510795ae4174f9f4bfb119b303b25e9ca59e47f518c305850ee28b").unwrap()),
				],
			},
			Network::Regtest => ConsensusParams {
				network,
				subsidy_halving_interval: 150,
				bip16_height: 0,
				bip34_height: 100_000_000, // not activated on regtest
				bip34_hash: SHA256D::default(),
				bip65_height: 1351, // used only in rpc tests
				bip66_height: 1251,
				pow_limit_sha: network.max_bits_sha(),
				// never consulted before no_retargeting applies
				starting_difficulty: U256::zero(),
				pow_limit_hive: hive_limit,
				pow_type_limits: [network.max_bits_sha(), network.max_bits_sha()],
				pow_target_timespan: 8 * 60,
				pow_target_spacing: 2 * 60,
				allow_min_difficulty_blocks: true,
				no_retargeting: true,
				rule_change_activation_threshold: 108, // 75% for testchains
				miner_confirmation_window: 144,
				dgw_activation_height: 4001,
				// the multi-algo fork never activates on regtest
				pow_fork_time: u32::max_value(),
				testdummy_deployment: Some(Deployment {
					name: "testdummy",
					bit: 28,
					start_time: 0,
					timeout: NO_TIMEOUT,
				}),
				csv_deployment: Some(Deployment {
					name: "csv",
					bit: 0,
					start_time: 0,
					timeout: NO_TIMEOUT,
				}),
				segwit_deployment: Some(Deployment {
					name: "segwit",
					bit: 1,
					start_time: ALWAYS_ACTIVE,
					timeout: NO_TIMEOUT,
				}),
				minotaurx_deployment: None,
				min_bee_cost: 0,
				bee_cost_factor: 1,
				bee_creation_address: "",
				hive_community_address: "",
				community_contrib_factor: 1,
				bee_gestation_blocks: 0,
				bee_lifespan_blocks: 0,
				min_hive_check_block: 0,
				hive_block_spacing_target: 1,
				hive_block_spacing_target_typical_1_1: 1,
				hive_nonce_marker: 192,
				min_k: 0,
				max_k: 0,
				max_hive_diff: 0.0,
				max_k_pow: 0,
				pow_split1: 0.0,
				pow_split2: 0.0,
				max_consecutive_hive_blocks: 0,
				hive_difficulty_window: 0,
				lwma_averaging_window: 90,
				minimum_chain_work: U256::zero(),
				default_assume_valid: SHA256D::default(),
				checkpoints: vec![(
					0,
					SHA256D::from_str("000008ca1832a4baf228eb1553c03d3a2c8e02399550dd6ea8d65cec3ef23d2e").unwrap(),
				)],
			},
		}
	}

	pub fn magic(&self) -> Magic {
		self.network.magic()
	}

	/// Number of blocks between legacy difficulty adjustments.
	pub fn difficulty_adjustment_interval(&self) -> u32 {
		self.miner_confirmation_window
	}

	/// Envelope limit for compact-target range checks: the easiest of the
	/// per-algorithm limits.
	pub fn max_pow_type_limit(&self) -> U256 {
		let mut limit = U256::zero();
		for target in self.pow_type_limits.iter() {
			if *target > limit {
				limit = *target;
			}
		}
		limit
	}

	pub fn deployment(&self, pos: DeploymentPos) -> Option<&Deployment> {
		match pos {
			DeploymentPos::Testdummy => self.testdummy_deployment.as_ref(),
			DeploymentPos::Csv => self.csv_deployment.as_ref(),
			DeploymentPos::Segwit => self.segwit_deployment.as_ref(),
			DeploymentPos::MinotaurX => self.minotaurx_deployment.as_ref(),
		}
	}

	pub fn update_versionbits_parameters(&mut self, pos: DeploymentPos, start_time: i64, timeout: i64) {
		let deployment = match pos {
			DeploymentPos::Testdummy => &mut self.testdummy_deployment,
			DeploymentPos::Csv => &mut self.csv_deployment,
			DeploymentPos::Segwit => &mut self.segwit_deployment,
			DeploymentPos::MinotaurX => &mut self.minotaurx_deployment,
		};

		if let Some(deployment) = deployment.as_mut() {
			deployment.start_time = start_time;
			deployment.timeout = timeout;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::Network;
	use super::ConsensusParams;
	use primitives::compact::Compact;

	#[test]
	fn test_consensus_params_bip34_height() {
		assert_eq!(ConsensusParams::new(Network::Mainnet).bip34_height, 1);
		assert_eq!(ConsensusParams::new(Network::Testnet).bip34_height, 100);
		assert_eq!(ConsensusParams::new(Network::Regtest).bip34_height, 100_000_000);
	}

	#[test]
	fn test_consensus_params_pow_limits() {
		let main = ConsensusParams::new(Network::Mainnet);
		assert_eq!(Compact::from_u256(main.pow_limit_sha), Compact::new(0x1e0fffff));
		assert_eq!(Compact::from_u256(main.pow_type_limits[1]), Compact::new(0x1f0fffff));
		assert_eq!(Compact::from_u256(main.pow_limit_hive), Compact::new(0x200fffff));
		// the envelope for compact range checks is the easiest algo limit
		assert_eq!(main.max_pow_type_limit(), main.pow_type_limits[1]);
	}

	#[test]
	fn test_consensus_params_hive_fields() {
		let main = ConsensusParams::new(Network::Mainnet);
		assert_eq!(main.bee_gestation_blocks, 720);
		assert_eq!(main.bee_lifespan_blocks, 10_080);
		assert_eq!(main.max_consecutive_hive_blocks, 2);

		let test = ConsensusParams::new(Network::Testnet);
		assert_eq!(test.bee_gestation_blocks, 40);
		assert_eq!(test.bee_lifespan_blocks, 16_128);
	}

	#[test]
	fn test_consensus_params_minotaurx_deployment_bit() {
		let main = ConsensusParams::new(Network::Mainnet);
		let deployment = main.minotaurx_deployment.unwrap();
		assert_eq!(deployment.bit, 7);
		assert_eq!(deployment.start_time, main.pow_fork_time as i64);
	}

	#[test]
	fn test_consensus_miner_confirmation_window() {
		assert_eq!(ConsensusParams::new(Network::Mainnet).miner_confirmation_window, 8064);
		assert_eq!(ConsensusParams::new(Network::Testnet).miner_confirmation_window, 20);
		assert_eq!(ConsensusParams::new(Network::Regtest).miner_confirmation_window, 144);
	}
}
