//! Maza transaction.
//! https://en.bitcoin.it/wiki/Protocol_documentation#tx

use bitcrypto::{dhash256, SHA256D};
use primitives::bytes::Bytes;
use ser::{serialize, Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::io;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct OutPoint {
	pub hash: SHA256D,
	pub index: u32,
}

impl OutPoint {
	pub fn null() -> Self {
		OutPoint {
			hash: SHA256D::default(),
			index: u32::max_value(),
		}
	}

	pub fn is_null(&self) -> bool {
		self.hash == SHA256D::default() && self.index == u32::max_value()
	}
}

impl Serializable for OutPoint {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.hash).append(&self.index);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		36
	}
}

impl Deserializable for OutPoint {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(OutPoint {
			hash: reader.read()?,
			index: reader.read()?,
		})
	}
}

#[derive(Debug, PartialEq, Default, Clone)]
pub struct TransactionInput {
	pub previous_output: OutPoint,
	pub script_sig: Bytes,
	pub sequence: u32,
}

impl TransactionInput {
	pub fn coinbase(script_sig: Bytes) -> Self {
		TransactionInput {
			previous_output: OutPoint::null(),
			script_sig,
			sequence: u32::max_value(),
		}
	}
}

impl Serializable for TransactionInput {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.previous_output).append(&self.script_sig).append(&self.sequence);
	}
}

impl Deserializable for TransactionInput {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(TransactionInput {
			previous_output: reader.read()?,
			script_sig: reader.read()?,
			sequence: reader.read()?,
		})
	}
}

#[derive(Debug, PartialEq, Clone)]
pub struct TransactionOutput {
	pub value: u64,
	pub script_pubkey: Bytes,
}

impl Default for TransactionOutput {
	fn default() -> Self {
		TransactionOutput {
			value: 0xffff_ffff_ffff_ffffu64,
			script_pubkey: Bytes::default(),
		}
	}
}

impl Serializable for TransactionOutput {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&self.value).append(&self.script_pubkey);
	}
}

impl Deserializable for TransactionOutput {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(TransactionOutput {
			value: reader.read()?,
			script_pubkey: reader.read()?,
		})
	}
}

#[derive(Debug, PartialEq, Default, Clone)]
pub struct Transaction {
	pub version: i32,
	pub inputs: Vec<TransactionInput>,
	pub outputs: Vec<TransactionOutput>,
	pub lock_time: u32,
}

impl Transaction {
	pub fn hash(&self) -> SHA256D {
		dhash256(&serialize(self))
	}

	pub fn is_empty(&self) -> bool {
		self.inputs.is_empty() || self.outputs.is_empty()
	}

	pub fn is_null(&self) -> bool {
		self.inputs.iter().any(|input| input.previous_output.is_null())
	}

	pub fn is_coinbase(&self) -> bool {
		self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
	}

	pub fn total_spends(&self) -> u64 {
		let mut result = 0u64;
		for output in &self.outputs {
			if u64::max_value() - result < output.value {
				return u64::max_value();
			}
			result += output.value;
		}
		result
	}
}

impl Serializable for Transaction {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.version)
			.append_list(&self.inputs)
			.append_list(&self.outputs)
			.append(&self.lock_time);
	}
}

impl Deserializable for Transaction {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(Transaction {
			version: reader.read()?,
			inputs: reader.read_list()?,
			outputs: reader.read_list()?,
			lock_time: reader.read()?,
		})
	}
}
