//! Bee creation transactions and the hive coinbase payload.

use crate::builder::Builder;
use crate::opcode::Opcode;
use crate::script::Script;
use bitcrypto::{FromStr, SHA256D};
use chain::Transaction;
use keys::CompactSignature;

/// Byte offsets of the fields packed into a hive coinbase `vout[0]` script.
/// Encoder and decoder both read this table; the offsets are consensus.
mod layout {
	/// `OP_RETURN OP_BEE`
	pub const MARKER: usize = 0;
	/// `0x04` push marker, then the bee nonce as u32 LE
	pub const NONCE_MARKER: usize = 2;
	pub const NONCE: usize = 3;
	/// `0x04` push marker, then the claimed BCT height as u32 LE
	pub const HEIGHT_MARKER: usize = 7;
	pub const HEIGHT: usize = 8;
	/// `OP_TRUE` when the BCT carries a community contribution
	pub const CONTRIB: usize = 12;
	/// `0x40` push marker, then the BCT txid as 64 ASCII hex chars
	pub const TXID_MARKER: usize = 13;
	pub const TXID: usize = 14;
	/// `0x41` push marker, then the 65-byte recoverable signature
	pub const SIG_MARKER: usize = 78;
	pub const SIG: usize = 79;
	/// Minimum script length covering all of the above
	pub const LEN: usize = 144;
}

#[derive(Debug, PartialEq)]
pub enum PayloadError {
	/// vout[0] is shorter than the fixed encoding
	TooShort,
	/// missing `OP_RETURN OP_BEE` prefix
	NoMarker,
	/// one of the fixed-size push markers is wrong
	BadFieldMarker,
	/// txid field does not hold 64 hex characters
	BadTxid,
}

/// Fields a hive miner packs into the coinbase `vout[0]` script.
#[derive(Debug, PartialEq, Clone)]
pub struct HiveCoinbasePayload {
	pub bee_nonce: u32,
	pub bct_claimed_height: u32,
	pub community_contrib: bool,
	pub bct_txid: SHA256D,
	pub signature: CompactSignature,
}

impl HiveCoinbasePayload {
	pub fn from_script(script: &Script) -> Result<Self, PayloadError> {
		let data: &[u8] = script;

		if data.len() < layout::LEN {
			return Err(PayloadError::TooShort);
		}

		if data[layout::MARKER] != Opcode::OP_RETURN as u8 || data[layout::MARKER + 1] != Opcode::OP_BEE as u8 {
			return Err(PayloadError::NoMarker);
		}

		if data[layout::NONCE_MARKER] != 0x04 || data[layout::HEIGHT_MARKER] != 0x04 {
			return Err(PayloadError::BadFieldMarker);
		}
		if data[layout::TXID_MARKER] != 0x40 || data[layout::SIG_MARKER] != 0x41 {
			return Err(PayloadError::BadFieldMarker);
		}

		let bee_nonce = read_le32(&data[layout::NONCE..layout::NONCE + 4]);
		let bct_claimed_height = read_le32(&data[layout::HEIGHT..layout::HEIGHT + 4]);
		let community_contrib = data[layout::CONTRIB] == Opcode::OP_1 as u8;

		let txid_ascii = &data[layout::TXID..layout::TXID + 64];
		let txid_str = std::str::from_utf8(txid_ascii).map_err(|_| PayloadError::BadTxid)?;
		let bct_txid = SHA256D::from_str(txid_str).map_err(|_| PayloadError::BadTxid)?;

		let signature = CompactSignature::from(&data[layout::SIG..layout::SIG + 65]);

		Ok(HiveCoinbasePayload {
			bee_nonce,
			bct_claimed_height,
			community_contrib,
			bct_txid,
			signature,
		})
	}

	pub fn to_script(&self) -> Script {
		let contrib = if self.community_contrib { Opcode::OP_1 } else { Opcode::OP_0 };

		Builder::default()
			.push_opcode(Opcode::OP_RETURN)
			.push_opcode(Opcode::OP_BEE)
			.push_data(&self.bee_nonce.to_le_bytes())
			.push_data(&self.bct_claimed_height.to_le_bytes())
			.push_opcode(contrib)
			.push_data(self.bct_txid.to_string().as_bytes())
			.push_data(&self.signature)
			.into_script()
	}
}

#[inline]
fn read_le32(data: &[u8]) -> u32 {
	u32::from_le_bytes([data[0], data[1], data[2], data[3]])
}

/// Classifies a bee creation transaction against the bee-creation-fund
/// script, returning the fee paid for bees (the amount burned to the fund).
pub fn bct_bee_fee(tx: &Transaction, bee_creation_script: &Script) -> Option<u64> {
	let first = tx.outputs.get(0)?;
	let script = Script::new(first.script_pubkey.clone());
	script.is_bee_creation(bee_creation_script)?;
	Some(first.value)
}

#[cfg(test)]
mod tests {
	use super::{bct_bee_fee, HiveCoinbasePayload, PayloadError};
	use crate::builder::Builder;
	use crate::opcode::Opcode;
	use crate::script::Script;
	use bitcrypto::{FromStr, HASH160, SHA256D};
	use chain::{Transaction, TransactionOutput};
	use keys::CompactSignature;

	fn sample_payload() -> HiveCoinbasePayload {
		HiveCoinbasePayload {
			bee_nonce: 7,
			bct_claimed_height: 628_100,
			community_contrib: true,
			bct_txid: SHA256D::from_str("7f5e2a71075e6fde60b7db1c8e5659c1c83b7368465a5a2af1e9f11616f1a25b").unwrap(),
			signature: CompactSignature::from(&[0x1bu8; 65][..]),
		}
	}

	#[test]
	fn test_payload_roundtrip() {
		let payload = sample_payload();
		let script = payload.to_script();
		assert_eq!(script.len(), 144);
		assert_eq!(HiveCoinbasePayload::from_script(&script), Ok(payload));
	}

	#[test]
	fn test_payload_requires_marker() {
		let mut raw: Vec<u8> = payload_bytes();
		raw[1] = Opcode::OP_RETURN as u8;
		assert_eq!(
			HiveCoinbasePayload::from_script(&Script::new(raw.into())),
			Err(PayloadError::NoMarker)
		);
	}

	#[test]
	fn test_payload_too_short() {
		let raw = payload_bytes();
		let script = Script::new(raw[..100].to_vec().into());
		assert_eq!(HiveCoinbasePayload::from_script(&script), Err(PayloadError::TooShort));
	}

	fn payload_bytes() -> Vec<u8> {
		sample_payload().to_script().to_bytes().take()
	}

	#[test]
	fn test_bct_bee_fee() {
		let bcf_hash = HASH160::from_str("802519b33de6c341c7c1ed549213d9b70f853b7d").unwrap();
		let honey_hash = HASH160::from_str("2d06221104ae184ef1027c013add7f314f63d327").unwrap();
		let bcf = Builder::build_p2pkh(&bcf_hash);
		let honey = Builder::build_p2pkh(&honey_hash);

		let bct_script = Builder::default()
			.append_script(&bcf)
			.push_opcode(Opcode::OP_RETURN)
			.push_data(&honey)
			.into_script();

		let tx = Transaction {
			version: 1,
			inputs: vec![],
			outputs: vec![TransactionOutput {
				value: 400_000_000,
				script_pubkey: bct_script.to_bytes(),
			}],
			lock_time: 0,
		};

		assert_eq!(bct_bee_fee(&tx, &bcf), Some(400_000_000));
		assert_eq!(bct_bee_fee(&tx, &honey), None);
	}
}
