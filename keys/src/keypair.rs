use crate::hash::{H264, H520};
use crate::network::Network;
use crate::{Address, Error, Private, Public, Type, SECP256K1};
use secp256k1::key;
use std::fmt;

pub struct KeyPair {
	private: Private,
	public: Public,
}

impl fmt::Display for KeyPair {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(f, "private: {}", self.private)?;
		writeln!(f, "public: {}", self.public)
	}
}

impl KeyPair {
	pub fn private(&self) -> &Private {
		&self.private
	}

	pub fn public(&self) -> &Public {
		&self.public
	}

	pub fn from_private(private: Private) -> Result<KeyPair, Error> {
		let context = &SECP256K1;
		let secret = key::SecretKey::from_slice(&private.secret)?;
		let pub_key = key::PublicKey::from_secret_key(context, &secret);

		let public = if private.compressed {
			let serialized = pub_key.serialize();
			let mut public = H264::default();
			public.copy_from_slice(&serialized);
			Public::Compressed(public)
		} else {
			let serialized = pub_key.serialize_uncompressed();
			let mut public = H520::default();
			public.copy_from_slice(&serialized);
			Public::Normal(public)
		};

		Ok(KeyPair { private, public })
	}

	pub fn from_keypair(sec: key::SecretKey, public: key::PublicKey, network: Network) -> Self {
		let serialized = public.serialize_uncompressed();
		let mut secret = [0u8; 32];
		secret.copy_from_slice(&sec[0..32]);
		let mut public = H520::default();
		public.copy_from_slice(&serialized);

		KeyPair {
			private: Private {
				network,
				secret,
				compressed: false,
			},
			public: Public::Normal(public),
		}
	}

	/// P2PKH address of this key pair.
	pub fn address(&self) -> Address {
		Address {
			kind: Type::P2PKH,
			network: self.private.network,
			hash: self.public.address_hash(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::KeyPair;
	use crate::{Network, Private};

	#[test]
	fn test_from_private_address_network() {
		let private = Private {
			network: Network::Testnet,
			secret: [2u8; 32],
			compressed: false,
		};

		let key_pair = KeyPair::from_private(private).unwrap();
		let address = key_pair.address();
		assert_eq!(address.network, Network::Testnet);
		assert_eq!(address.hash, key_pair.public().address_hash());
	}
}
