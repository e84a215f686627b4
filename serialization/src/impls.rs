use crate::compact_integer::CompactInteger;
use crate::{Deserializable, Error, Reader, Serializable, Stream};
use bitcrypto::{Hash, SHA256D};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use primitives::bytes::Bytes;
use primitives::compact::Compact;
use std::io;

impl Serializable for bool {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u8(*self as u8).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		1
	}
}

impl Serializable for i32 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_i32::<LittleEndian>(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		4
	}
}

impl Serializable for i64 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_i64::<LittleEndian>(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		8
	}
}

impl Serializable for u8 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u8(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		1
	}
}

impl Serializable for u16 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u16::<LittleEndian>(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		2
	}
}

impl Serializable for u32 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u32::<LittleEndian>(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		4
	}
}

impl Serializable for u64 {
	#[inline]
	fn serialize(&self, s: &mut Stream) {
		s.write_u64::<LittleEndian>(*self).unwrap();
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		8
	}
}

impl Deserializable for bool {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let value = reader.read_u8()?;
		match value {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(Error::MalformedData),
		}
	}
}

impl Deserializable for i32 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_i32::<LittleEndian>()?)
	}
}

impl Deserializable for i64 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_i64::<LittleEndian>()?)
	}
}

impl Deserializable for u8 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_u8()?)
	}
}

impl Deserializable for u16 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_u16::<LittleEndian>()?)
	}
}

impl Deserializable for u32 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_u32::<LittleEndian>()?)
	}
}

impl Deserializable for u64 {
	#[inline]
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		Ok(reader.read_u64::<LittleEndian>()?)
	}
}

impl Serializable for Compact {
	#[inline]
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&u32::from(*self));
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		4
	}
}

impl Deserializable for Compact {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		reader.read::<u32>().map(Compact::new)
	}
}

impl Serializable for SHA256D {
	#[inline]
	fn serialize(&self, stream: &mut Stream) {
		stream.append_slice(&self[..]);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		32
	}
}

impl Deserializable for SHA256D {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let mut result = [0u8; 32];
		reader.read_slice(&mut result)?;
		Ok(SHA256D::from_inner(result))
	}
}

impl Serializable for Bytes {
	fn serialize(&self, stream: &mut Stream) {
		stream.append(&CompactInteger::from(self.len())).append_slice(self);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		CompactInteger::from(self.len()).serialized_size() + self.len()
	}
}

impl Deserializable for Bytes {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let len = reader.read::<CompactInteger>()?;
		let mut bytes = Bytes::new_with_len(len.into());
		reader.read_slice(&mut bytes)?;
		Ok(bytes)
	}
}

impl Serializable for String {
	fn serialize(&self, stream: &mut Stream) {
		let bytes: &[u8] = self.as_ref();
		stream.append(&CompactInteger::from(bytes.len())).append_slice(bytes);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		let bytes: &[u8] = self.as_ref();
		CompactInteger::from(bytes.len()).serialized_size() + bytes.len()
	}
}

impl<'a> Serializable for &'a str {
	fn serialize(&self, stream: &mut Stream) {
		let bytes: &[u8] = self.as_bytes();
		stream.append(&CompactInteger::from(bytes.len())).append_slice(bytes);
	}

	#[inline]
	fn serialized_size(&self) -> usize {
		let bytes: &[u8] = self.as_bytes();
		CompactInteger::from(bytes.len()).serialized_size() + bytes.len()
	}
}

impl Deserializable for String {
	fn deserialize<T>(reader: &mut Reader<T>) -> Result<Self, Error>
	where
		T: io::Read,
	{
		let bytes: Bytes = reader.read()?;
		Ok(String::from_utf8_lossy(&bytes).into_owned())
	}
}
