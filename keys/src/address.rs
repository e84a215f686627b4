//! Maza base58check address.
//!
//! The version byte selects both the network and the address kind; see the
//! per-network tables in `network.rs`.

use crate::network::Network;
use crate::{AddressHash, DisplayLayout, Error};
use base58::{FromBase58, ToBase58};
use bitcrypto::Hash;
use primitives::checksum::Checksum;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// There are two address formats currently in use.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
	/// Pay to PubKey Hash
	P2PKH,
	/// Pay to Script Hash
	P2SH,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Address {
	/// The type of the address.
	pub kind: Type,
	/// The network of the address.
	pub network: Network,
	/// Public key hash.
	pub hash: AddressHash,
}

pub struct AddressDisplayLayout([u8; 25]);

impl Deref for AddressDisplayLayout {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DisplayLayout for Address {
	type Target = AddressDisplayLayout;

	fn layout(&self) -> Self::Target {
		let mut result = [0u8; 25];

		result[0] = match self.kind {
			Type::P2PKH => self.network.pubkey_address_prefix(),
			Type::P2SH => self.network.script_address_prefix(),
		};

		result[1..21].copy_from_slice(&self.hash[..]);
		let cs = Checksum::generate(&result[0..21]);
		result[21..25].copy_from_slice(&cs[..]);
		AddressDisplayLayout(result)
	}

	fn from_layout(data: &[u8]) -> Result<Self, Error> {
		if data.len() != 25 {
			return Err(Error::InvalidAddress);
		}

		let cs = Checksum::from_slice(&data[21..]);
		if Checksum::generate(&data[0..21]) != cs {
			return Err(Error::InvalidChecksum);
		}

		let (network, kind) = match data[0] {
			50 => (Network::Mainnet, Type::P2PKH),
			9 => (Network::Mainnet, Type::P2SH),
			88 => (Network::Testnet, Type::P2PKH),
			188 => (Network::Testnet, Type::P2SH),
			140 => (Network::Regtest, Type::P2PKH),
			19 => (Network::Regtest, Type::P2SH),
			_ => return Err(Error::InvalidAddress),
		};

		let hash = AddressHash::from_slice(&data[1..21]).map_err(|_| Error::InvalidAddress)?;

		Ok(Address { kind, network, hash })
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.layout().to_base58().fmt(f)
	}
}

impl FromStr for Address {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let hex = s.from_base58().map_err(|_| Error::InvalidAddress)?;
		Address::from_layout(&hex)
	}
}

impl From<&'static str> for Address {
	fn from(s: &'static str) -> Self {
		s.parse().unwrap()
	}
}

#[cfg(test)]
mod tests {
	use super::{Address, Type};
	use crate::Network;
	use bitcrypto::{FromStr, HASH160};

	#[test]
	fn test_address_to_string() {
		let address = Address {
			kind: Type::P2PKH,
			network: Network::Mainnet,
			hash: HASH160::from_str("365f0c7a256dfaa12a5db732587a67c6c2f010f4").unwrap(),
		};

		assert_eq!("MCreateBeeMainXXXXXXXXXXXXXXVQWqkH".to_owned(), address.to_string());
	}

	#[test]
	fn test_maza_hive_addresses_decode() {
		// bee creation fund addresses are P2PKH on both networks
		let bcf: Address = "MCreateBeeMainXXXXXXXXXXXXXXVQWqkH".into();
		assert_eq!(bcf.network, Network::Mainnet);
		assert_eq!(bcf.kind, Type::P2PKH);

		let bcf_test: Address = "ccReateBeetestnetXXXXXXXXXXXVPRtyV".into();
		assert_eq!(bcf_test.network, Network::Testnet);
		assert_eq!(bcf_test.kind, Type::P2PKH);

		// the mainnet community fund pays a script hash
		let cf: Address = "4xscpVDbThrWVk4GD177JqniTvZ8RPa6qo".into();
		assert_eq!(cf.network, Network::Mainnet);
		assert_eq!(cf.kind, Type::P2SH);

		let cf_test: Address = "cUr9QKe9f7vk6174C45yyW6CLJ8Qq1MKLL".into();
		assert_eq!(cf_test.network, Network::Testnet);
		assert_eq!(cf_test.kind, Type::P2PKH);
	}

	#[test]
	fn test_address_bad_checksum() {
		assert!("MCreateBeeMainXXXXXXXXXXXXXXVQWqkg".parse::<Address>().is_err());
	}

	#[test]
	fn test_address_roundtrip() {
		let address: Address = "cUr9QKe9f7vk6174C45yyW6CLJ8Qq1MKLL".into();
		assert_eq!(address.to_string(), "cUr9QKe9f7vk6174C45yyW6CLJ8Qq1MKLL".to_owned());
	}
}
