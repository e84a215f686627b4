use crate::hash::H520;
use crate::network::Network;
use crate::{CompactSignature, DisplayLayout, Error, Message, Secret, Signature, SECP256K1};
use base58::{FromBase58, ToBase58};
use primitives::checksum::Checksum;
use secp256k1::key;
use secp256k1::Message as SecpMessage;
use std::fmt;
use std::str::FromStr;

/// Secret with additional network identifier and format type
#[derive(Debug, PartialEq, Clone)]
pub struct Private {
	/// The network on which this key should be used.
	pub network: Network,
	/// ECDSA key.
	pub secret: Secret,
	/// True if the public key corresponding to this key is compressed.
	pub compressed: bool,
}

impl Private {
	pub fn sign(&self, message: &Message) -> Result<Signature, Error> {
		let context = &SECP256K1;
		let secret = key::SecretKey::from_slice(&self.secret)?;
		let message = SecpMessage::from_slice(&message[..])?;
		let signature = context.sign(&message, &secret);
		let data = signature.serialize_der();
		Ok(data.as_ref().to_vec().into())
	}

	pub fn sign_compact(&self, message: &Message) -> Result<CompactSignature, Error> {
		let context = &SECP256K1;
		let secret = key::SecretKey::from_slice(&self.secret)?;
		let message = SecpMessage::from_slice(&message[..])?;
		let signature = context.sign_recoverable(&message, &secret);
		let (recovery_id, data) = signature.serialize_compact();
		let recovery_id = recovery_id.to_i32() as u8;
		let mut signature = H520::default();
		signature[1..65].copy_from_slice(&data[0..64]);
		if self.compressed {
			signature[0] = 27 + recovery_id + 4;
		} else {
			signature[0] = 27 + recovery_id;
		}
		Ok(signature.into())
	}
}

pub struct PrivateDisplayLayout(Vec<u8>);

impl std::ops::Deref for PrivateDisplayLayout {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DisplayLayout for Private {
	type Target = PrivateDisplayLayout;

	fn layout(&self) -> Self::Target {
		let mut data = Vec::with_capacity(38);
		data.push(self.network.wif_prefix());
		data.extend_from_slice(&self.secret);
		if self.compressed {
			data.push(1);
		}
		let cs = Checksum::generate(&data);
		data.extend_from_slice(&cs[..]);
		PrivateDisplayLayout(data)
	}

	fn from_layout(data: &[u8]) -> Result<Self, Error> {
		let compressed = match data.len() {
			37 => false,
			38 => true,
			_ => return Err(Error::InvalidAddress),
		};

		if compressed && data[data.len() - 5] != 1 {
			return Err(Error::InvalidAddress);
		}

		let cs = Checksum::from_slice(&data[data.len() - 4..]);
		if Checksum::generate(&data[0..data.len() - 4]) != cs {
			return Err(Error::InvalidChecksum);
		}

		let network = match data[0] {
			224 => Network::Mainnet,
			239 => Network::Testnet,
			_ => return Err(Error::InvalidAddress),
		};

		let mut secret = Secret::default();
		secret.copy_from_slice(&data[1..33]);

		Ok(Private {
			network,
			secret,
			compressed,
		})
	}
}

impl fmt::Display for Private {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.layout().to_base58().fmt(f)
	}
}

impl FromStr for Private {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let hex = s.from_base58().map_err(|_| Error::InvalidAddress)?;
		Private::from_layout(&hex)
	}
}

impl From<&'static str> for Private {
	fn from(s: &'static str) -> Self {
		s.parse().unwrap()
	}
}
