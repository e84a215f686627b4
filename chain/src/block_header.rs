use bitcrypto::{dhash256, SHA256D};
use primitives::compact::Compact;
use ser::{serialize, Deserializable, Error as ReaderError, Reader, Serializable, Stream};
use std::{fmt, io};

/// Number of distinct proof-of-work algorithms.
pub const NUM_BLOCK_TYPES: usize = 2;

/// Proof-of-work algorithm a header commits to.
///
/// The algorithm tag lives in bits 16..24 of the header version. Headers with
/// versions of `0x20000000` and above predate the multi-algo fork and carry
/// plain version-bits there instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowType {
	Sha256d = 0,
	MinotaurX = 1,
}

impl PowType {
	pub fn from_version(version: u32) -> Option<PowType> {
		match (version >> 16) & 0xff {
			0 => Some(PowType::Sha256d),
			1 => Some(PowType::MinotaurX),
			_ => None,
		}
	}

	pub fn name(&self) -> &'static str {
		match *self {
			PowType::Sha256d => "sha256d",
			PowType::MinotaurX => "minotaurx",
		}
	}
}

#[derive(PartialEq, Clone)]
pub struct BlockHeader {
	pub version: u32,
	pub previous_header_hash: SHA256D,
	pub merkle_root_hash: SHA256D,
	pub time: u32,
	pub bits: Compact,
	pub nonce: u32,
}

impl BlockHeader {
	/// Compute hash of the block header.
	pub fn hash(&self) -> SHA256D {
		block_header_hash(self)
	}

	/// Algorithm tag carried in the version bits.
	pub fn pow_type(&self) -> Option<PowType> {
		PowType::from_version(self.version)
	}

	/// Hive-mined blocks carry no proof-of-work; miners mark them with a
	/// well-known nonce instead.
	pub fn is_hive_mined(&self, hive_nonce_marker: u32) -> bool {
		self.nonce == hive_nonce_marker
	}
}

impl fmt::Debug for BlockHeader {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("BlockHeader")
			.field("version", &self.version)
			.field("previous_header_hash", &self.previous_header_hash)
			.field("merkle_root_hash", &self.merkle_root_hash)
			.field("time", &self.time)
			.field("bits", &self.bits)
			.field("nonce", &self.nonce)
			.finish()
	}
}

impl Serializable for BlockHeader {
	fn serialize(&self, stream: &mut Stream) {
		stream
			.append(&self.version)
			.append(&self.previous_header_hash)
			.append(&self.merkle_root_hash)
			.append(&self.time)
			.append(&self.bits)
			.append(&self.nonce);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		80
	}
}

impl Deserializable for BlockHeader {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, ReaderError>
	where
		T: io::Read,
	{
		Ok(BlockHeader {
			version: reader.read()?,
			previous_header_hash: reader.read()?,
			merkle_root_hash: reader.read()?,
			time: reader.read()?,
			bits: reader.read()?,
			nonce: reader.read()?,
		})
	}
}

/// Compute hash of the serialized block header.
pub fn block_header_hash(header: &BlockHeader) -> SHA256D {
	dhash256(&serialize(header))
}

#[cfg(test)]
mod tests {
	use super::{BlockHeader, PowType};
	use bitcrypto::{Hash, SHA256D};
	use ser::{deserialize, serialize};

	fn sample_header() -> BlockHeader {
		BlockHeader {
			version: 1,
			previous_header_hash: SHA256D::from_inner([2u8; 32]),
			merkle_root_hash: SHA256D::from_inner([3u8; 32]),
			time: 4,
			bits: 5.into(),
			nonce: 6,
		}
	}

	#[test]
	fn test_block_header_stream() {
		let header = sample_header();
		let serialized = serialize(&header);
		assert_eq!(serialized.len(), 80);
		assert_eq!(serialized[0], 1);
		assert_eq!(deserialize::<_, BlockHeader>(&serialized[..]).unwrap(), header);
	}

	#[test]
	fn test_pow_type_from_version() {
		assert_eq!(PowType::from_version(1), Some(PowType::Sha256d));
		assert_eq!(PowType::from_version(0x10000000), Some(PowType::Sha256d));
		assert_eq!(PowType::from_version(0x10010000), Some(PowType::MinotaurX));
		assert_eq!(PowType::from_version(0x10070000), None);
	}

	#[test]
	fn test_hive_marker() {
		let mut header = sample_header();
		assert!(!header.is_hive_mined(192));
		header.nonce = 192;
		assert!(header.is_hive_mined(192));
	}
}
