use crate::opcode::Opcode;
use crate::script::Script;
use keys::{Address, AddressHash, Type};
use primitives::bytes::Bytes;

/// Script builder.
#[derive(Default)]
pub struct Builder {
	data: Bytes,
}

impl Builder {
	/// Builds p2pkh script pubkey
	pub fn build_p2pkh(address: &AddressHash) -> Script {
		Builder::default()
			.push_opcode(Opcode::OP_DUP)
			.push_opcode(Opcode::OP_HASH160)
			.push_data(&address[..])
			.push_opcode(Opcode::OP_EQUALVERIFY)
			.push_opcode(Opcode::OP_CHECKSIG)
			.into_script()
	}

	/// Builds p2sh script pubkey
	pub fn build_p2sh(address: &AddressHash) -> Script {
		Builder::default()
			.push_opcode(Opcode::OP_HASH160)
			.push_data(&address[..])
			.push_opcode(Opcode::OP_EQUAL)
			.into_script()
	}

	/// Appends a single opcode to the end of the script.
	pub fn push_opcode(mut self, opcode: Opcode) -> Self {
		self.data.push(opcode as u8);
		self
	}

	/// Appends minimally-encoded push of the given data.
	pub fn push_data(mut self, data: &[u8]) -> Self {
		let len = data.len();
		if len < Opcode::OP_PUSHDATA1 as usize {
			self.data.push(len as u8);
		} else if len < 0x100 {
			self.data.push(Opcode::OP_PUSHDATA1 as u8);
			self.data.push(len as u8);
		} else if len < 0x10000 {
			self.data.push(Opcode::OP_PUSHDATA2 as u8);
			self.data.push(len as u8);
			self.data.push((len >> 8) as u8);
		} else {
			self.data.push(Opcode::OP_PUSHDATA4 as u8);
			self.data.push(len as u8);
			self.data.push((len >> 8) as u8);
			self.data.push((len >> 16) as u8);
			self.data.push((len >> 24) as u8);
		}
		self.data.extend_from_slice(data);
		self
	}

	/// Appends another script verbatim, without a push prefix.
	pub fn append_script(mut self, script: &Script) -> Self {
		self.data.extend_from_slice(script);
		self
	}

	pub fn into_script(self) -> Script {
		Script::new(self.data)
	}

	pub fn into_bytes(self) -> Bytes {
		self.data
	}
}

/// Script pubkey paying to the given address, the way the original
/// `GetScriptForDestination` resolves decoded destinations.
pub fn script_for_address(address: &Address) -> Script {
	match address.kind {
		Type::P2PKH => Builder::build_p2pkh(&address.hash),
		Type::P2SH => Builder::build_p2sh(&address.hash),
	}
}
