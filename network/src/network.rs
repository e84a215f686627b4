//! Maza network identities and deterministic genesis construction.

use bitcrypto::{FromStr, SHA256D};
use chain::constants::COIN;
use chain::{Block, BlockHeader, Transaction, TransactionInput, TransactionOutput};
use primitives::bytes::Bytes;
use primitives::compact::Compact;
use primitives::U256;
use script::{Builder, Opcode};

const GENESIS_TIMESTAMP: &str = "February 5, 2014: The Black Hills are not for sale - 1868 Is The LAW!";
const GENESIS_OUTPUT_PUBKEY: &str = "04678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5f";

/// Magic bytes prefixing every p2p message.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Magic(pub [u8; 4]);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Network {
	Mainnet,
	Testnet,
	Regtest,
}

impl Network {
	pub fn name(&self) -> &'static str {
		match *self {
			Network::Mainnet => "main",
			Network::Testnet => "test",
			Network::Regtest => "regtest",
		}
	}

	pub fn magic(&self) -> Magic {
		match *self {
			Network::Mainnet => Magic([0xf8, 0xb5, 0x03, 0xdf]),
			Network::Testnet => Magic([0x05, 0xfe, 0xa9, 0x01]),
			Network::Regtest => Magic([0xfa, 0x0f, 0xa5, 0x5a]),
		}
	}

	pub fn default_port(&self) -> u16 {
		match *self {
			Network::Mainnet => 12835,
			Network::Testnet => 11835,
			Network::Regtest => 11444,
		}
	}

	/// Matching address-prefix table.
	pub fn keys_network(&self) -> keys::Network {
		match *self {
			Network::Mainnet => keys::Network::Mainnet,
			Network::Testnet => keys::Network::Testnet,
			Network::Regtest => keys::Network::Regtest,
		}
	}

	pub fn ext_public_key_prefix(&self) -> [u8; 4] {
		match *self {
			Network::Mainnet => [0x04, 0x88, 0xb2, 0x1e],
			Network::Testnet | Network::Regtest => [0x04, 0x35, 0x87, 0xcf],
		}
	}

	pub fn ext_secret_key_prefix(&self) -> [u8; 4] {
		match *self {
			Network::Mainnet => [0x04, 0x88, 0xad, 0xe4],
			Network::Testnet | Network::Regtest => [0x04, 0x35, 0x83, 0x94],
		}
	}

	pub fn bech32_hrp(&self) -> &'static str {
		match *self {
			Network::Mainnet => "maza",
			Network::Testnet => "tmaza",
			Network::Regtest => "rmaza",
		}
	}

	/// Highest (easiest) sha256d target.
	pub fn max_bits_sha(&self) -> U256 {
		match *self {
			Network::Mainnet | Network::Testnet => {
				"00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap()
			}
			Network::Regtest => "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
		}
	}

	pub fn genesis_block_hash(&self) -> SHA256D {
		let literal = match *self {
			Network::Mainnet => "00000c7c73d8ce604178dae13f0fc6ec0be3275614366d44b1b4b5c6e238c60c",
			Network::Testnet => "000003ae7f631de18a457fa4fa078e6fa8aff38e258458f8189810de5d62cede",
			Network::Regtest => "57939ce0a96bf42965fee5956528a456d0edfb879b8bd699bcbb4786d27b979d",
		};
		SHA256D::from_str(literal).unwrap()
	}

	pub fn genesis_block(&self) -> Block {
		let block = match *self {
			Network::Mainnet => create_genesis_block(1390747675, 2091390249, 0x1e0ffff0.into(), 1, 5000 * COIN),
			Network::Testnet => create_genesis_block(1411587941, 2091634749, 0x1e0ffff0.into(), 1, 5000 * COIN),
			Network::Regtest => create_genesis_block(1390748221, 4, 0x207fffff.into(), 1, 5000 * COIN),
		};

		assert_eq!(block.hash(), self.genesis_block_hash());
		// the historical regtest merkle literal contradicts the regtest
		// genesis hash, so only main and test pin the merkle root
		if let Network::Mainnet | Network::Testnet = *self {
			assert_eq!(
				block.block_header.merkle_root_hash,
				SHA256D::from_str("62d496378e5834989dd9594cfc168dbb76f84a39bbda18286cddc7d1d1589f4f").unwrap()
			);
		}
		block
	}
}

/// Builds the genesis block from the network launch constants. The output of
/// the generation transaction cannot be spent; it is not in the database.
fn create_genesis_block(time: u32, nonce: u32, bits: Compact, version: u32, reward: u64) -> Block {
	let pubkey: Bytes = GENESIS_OUTPUT_PUBKEY.parse().unwrap();
	let output_script = Builder::default().push_data(&pubkey).push_opcode(Opcode::OP_CHECKSIG).into_bytes();

	let script_sig = Builder::default()
		.push_data(&486604799u32.to_le_bytes())
		.push_data(&[4])
		.push_data(GENESIS_TIMESTAMP.as_bytes())
		.into_bytes();

	let coinbase = Transaction {
		version: 1,
		inputs: vec![TransactionInput::coinbase(script_sig)],
		outputs: vec![TransactionOutput {
			value: reward,
			script_pubkey: output_script,
		}],
		lock_time: 0,
	};

	let mut block = Block::new(
		BlockHeader {
			version,
			previous_header_hash: Default::default(),
			merkle_root_hash: Default::default(),
			time,
			bits,
			nonce,
		},
		vec![coinbase],
	);

	block.block_header.merkle_root_hash = block.merkle_root();
	block
}
