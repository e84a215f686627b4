//! Variable-length integers used to encode collection sizes.

use crate::{Deserializable, Error, Reader, Serializable, Stream};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct CompactInteger(u64);

impl From<CompactInteger> for usize {
	fn from(i: CompactInteger) -> Self {
		i.0 as usize
	}
}

impl From<CompactInteger> for u64 {
	fn from(i: CompactInteger) -> Self {
		i.0
	}
}

impl From<u8> for CompactInteger {
	fn from(i: u8) -> Self {
		CompactInteger(i as u64)
	}
}

impl From<u16> for CompactInteger {
	fn from(i: u16) -> Self {
		CompactInteger(i as u64)
	}
}

impl From<u32> for CompactInteger {
	fn from(i: u32) -> Self {
		CompactInteger(i as u64)
	}
}

impl From<usize> for CompactInteger {
	fn from(i: usize) -> Self {
		CompactInteger(i as u64)
	}
}

impl From<u64> for CompactInteger {
	fn from(i: u64) -> Self {
		CompactInteger(i)
	}
}

impl Serializable for CompactInteger {
	fn serialize(&self, stream: &mut Stream) {
		match self.0 {
			0..=0xfc => {
				stream.write_u8(self.0 as u8).unwrap();
			}
			0xfd..=0xffff => {
				stream.write_u8(0xfd).unwrap();
				stream.write_u16::<LittleEndian>(self.0 as u16).unwrap();
			}
			0x10000..=0xffff_ffff => {
				stream.write_u8(0xfe).unwrap();
				stream.write_u32::<LittleEndian>(self.0 as u32).unwrap();
			}
			_ => {
				stream.write_u8(0xff).unwrap();
				stream.write_u64::<LittleEndian>(self.0).unwrap();
			}
		}
	}

	fn serialized_size(&self) -> usize {
		match self.0 {
			0..=0xfc => 1,
			0xfd..=0xffff => 3,
			0x10000..=0xffff_ffff => 5,
			_ => 9,
		}
	}
}

impl Deserializable for CompactInteger {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let result = match reader.read_u8()? {
			i @ 0..=0xfc => i.into(),
			0xfd => reader.read_u16::<LittleEndian>()?.into(),
			0xfe => reader.read_u32::<LittleEndian>()?.into(),
			_ => reader.read_u64::<LittleEndian>()?.into(),
		};

		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::CompactInteger;
	use crate::{deserialize, serialize, Error};

	#[test]
	fn test_compact_integer_stream() {
		let s = serialize(&CompactInteger::from(0xfcu8));
		assert_eq!(s, "fc".into());
		let s = serialize(&CompactInteger::from(0xfdu16));
		assert_eq!(s, "fdfd00".into());
		let s = serialize(&CompactInteger::from(0x10000u32));
		assert_eq!(s, "fe00000100".into());
		let s = serialize(&CompactInteger::from(0x1_0000_0000u64));
		assert_eq!(s, "ff0000000001000000".into());
	}

	#[test]
	fn test_compact_integer_reader() {
		let c: CompactInteger = deserialize(&[0xfau8][..]).unwrap();
		assert_eq!(c, 0xfau8.into());
		let c: CompactInteger = deserialize(&[0xfdu8, 0xfd, 0x00][..]).unwrap();
		assert_eq!(c, 0xfdu16.into());
		let too_short: Result<CompactInteger, _> = deserialize(&[0xfdu8, 0xfd][..]);
		assert_eq!(too_short.unwrap_err(), Error::UnexpectedEnd);
	}
}
