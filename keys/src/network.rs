/// Maza chains an address can belong to, with their base58 version bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Network {
	Mainnet,
	Testnet,
	Regtest,
}

impl Network {
	pub fn pubkey_address_prefix(&self) -> u8 {
		match *self {
			Network::Mainnet => 50,
			Network::Testnet => 88,
			Network::Regtest => 140,
		}
	}

	pub fn script_address_prefix(&self) -> u8 {
		match *self {
			Network::Mainnet => 9,
			Network::Testnet => 188,
			Network::Regtest => 19,
		}
	}

	pub fn wif_prefix(&self) -> u8 {
		match *self {
			Network::Mainnet => 224,
			// testnet and regtest share the bitcoin testnet byte
			Network::Testnet | Network::Regtest => 239,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Network;

	#[test]
	fn test_network_prefixes() {
		assert_eq!(Network::Mainnet.pubkey_address_prefix(), 50);
		assert_eq!(Network::Mainnet.script_address_prefix(), 9);
		assert_eq!(Network::Mainnet.wif_prefix(), 224);
		assert_eq!(Network::Testnet.pubkey_address_prefix(), 88);
		assert_eq!(Network::Testnet.script_address_prefix(), 188);
		assert_eq!(Network::Regtest.pubkey_address_prefix(), 140);
		assert_eq!(Network::Regtest.script_address_prefix(), 19);
		assert_eq!(Network::Regtest.wif_prefix(), 239);
	}
}
