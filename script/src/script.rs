use crate::opcode::Opcode;
use bitcrypto::Hash;
use keys::{AddressHash, Public, Type};
use primitives::bytes::Bytes;
use std::{fmt, ops};

/// Address of a script destination.
#[derive(Debug, PartialEq, Clone)]
pub struct ScriptAddress {
	/// The type of the address.
	pub kind: Type,
	/// Public key hash.
	pub hash: AddressHash,
}

impl ScriptAddress {
	/// Creates P2PKH-type ScriptAddress
	pub fn new_p2pkh(hash: AddressHash) -> Self {
		ScriptAddress {
			kind: Type::P2PKH,
			hash,
		}
	}

	/// Creates P2SH-type ScriptAddress
	pub fn new_p2sh(hash: AddressHash) -> Self {
		ScriptAddress {
			kind: Type::P2SH,
			hash,
		}
	}
}

/// Serialized script, used inside transaction inputs and outputs.
#[derive(PartialEq, Default, Clone)]
pub struct Script {
	data: Bytes,
}

impl From<&'static str> for Script {
	fn from(s: &'static str) -> Self {
		Script::new(s.into())
	}
}

impl From<Bytes> for Script {
	fn from(s: Bytes) -> Self {
		Script::new(s)
	}
}

impl From<Vec<u8>> for Script {
	fn from(v: Vec<u8>) -> Self {
		Script::new(v.into())
	}
}

impl From<Script> for Bytes {
	fn from(script: Script) -> Self {
		script.data
	}
}

impl Script {
	/// Script constructor.
	pub fn new(data: Bytes) -> Self {
		Script { data }
	}

	pub fn to_bytes(&self) -> Bytes {
		self.data.clone()
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn is_pay_to_public_key_hash(&self) -> bool {
		self.data.len() == 25
			&& self.data[0] == Opcode::OP_DUP as u8
			&& self.data[1] == Opcode::OP_HASH160 as u8
			&& self.data[2] == 20
			&& self.data[23] == Opcode::OP_EQUALVERIFY as u8
			&& self.data[24] == Opcode::OP_CHECKSIG as u8
	}

	pub fn is_pay_to_script_hash(&self) -> bool {
		self.data.len() == 23
			&& self.data[0] == Opcode::OP_HASH160 as u8
			&& self.data[1] == 20
			&& self.data[22] == Opcode::OP_EQUAL as u8
	}

	pub fn is_pay_to_public_key(&self) -> bool {
		if self.data.is_empty() {
			return false;
		}

		let len = match self.data[0] {
			33 => 35,
			65 => 67,
			_ => return false,
		};

		self.data.len() == len && self.data[len - 1] == Opcode::OP_CHECKSIG as u8
	}

	/// Single destination this output pays to, if it is a standard pattern.
	pub fn extract_destination(&self) -> Option<ScriptAddress> {
		if self.is_pay_to_public_key_hash() {
			let hash = AddressHash::from_slice(&self.data[3..23]).expect("slice is 20 bytes; qed");
			return Some(ScriptAddress::new_p2pkh(hash));
		}

		if self.is_pay_to_script_hash() {
			let hash = AddressHash::from_slice(&self.data[2..22]).expect("slice is 20 bytes; qed");
			return Some(ScriptAddress::new_p2sh(hash));
		}

		if self.is_pay_to_public_key() {
			let len = self.data[0] as usize;
			let public = Public::from_slice(&self.data[1..1 + len]).ok()?;
			return Some(ScriptAddress::new_p2pkh(public.address_hash()));
		}

		None
	}

	/// A bee creation script is the bee-creation-fund script followed by
	/// `OP_RETURN` and the pushed honey scriptPubKey. Returns the embedded
	/// honey script on a match.
	pub fn is_bee_creation(&self, bee_creation_script: &Script) -> Option<Script> {
		let bcf: &[u8] = &bee_creation_script.data;
		let data: &[u8] = &self.data;

		if data.len() < bcf.len() + 2 || &data[..bcf.len()] != bcf {
			return None;
		}

		if data[bcf.len()] != Opcode::OP_RETURN as u8 {
			return None;
		}

		let push = data[bcf.len() + 1] as usize;
		let honey = &data[bcf.len() + 2..];
		if push == 0 || push != honey.len() {
			return None;
		}

		Some(Script::new(honey.into()))
	}
}

impl ops::Deref for Script {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

impl fmt::Debug for Script {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:?}", self.data)
	}
}

impl fmt::Display for Script {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:?}", self.data)
	}
}
