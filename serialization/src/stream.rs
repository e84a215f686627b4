//! Stream used for serialization of Bitcoin structures

use crate::compact_integer::CompactInteger;
use primitives::bytes::Bytes;
use std::borrow::Borrow;
use std::io::{self, Write};

pub fn serialize<T>(t: &T) -> Bytes
where
	T: Serializable,
{
	let mut stream = Stream::default();
	stream.append(t);
	stream.out()
}

pub fn serialized_list_size<T, K>(list: &[K]) -> usize
where
	T: Serializable,
	K: Borrow<T>,
{
	CompactInteger::from(list.len()).serialized_size() + list.iter().map(Borrow::borrow).map(Serializable::serialized_size).sum::<usize>()
}

pub trait Serializable {
	/// Serialize the struct and appends it to the end of stream.
	fn serialize(&self, s: &mut Stream);

	/// Hint about the size of serialized struct.
	fn serialized_size(&self) -> usize
	where
		Self: Sized,
	{
		// fallback implementation
		let mut stream = Stream::default();
		stream.append(self);
		stream.out().len()
	}
}

/// Stream used for serialization of Bitcoin structures
#[derive(Default)]
pub struct Stream {
	buffer: Vec<u8>,
}

impl Stream {
	/// New stream
	pub fn new() -> Self {
		Stream { buffer: Vec::new() }
	}

	/// Serializes the struct and appends it to the end of stream.
	pub fn append<T>(&mut self, t: &T) -> &mut Self
	where
		T: Serializable,
	{
		t.serialize(self);
		self
	}

	/// Appends raw bytes to the end of the stream.
	pub fn append_slice(&mut self, bytes: &[u8]) -> &mut Self {
		// discard error for now, since we write to simple vector
		self.buffer.write_all(bytes).unwrap();
		self
	}

	/// Appends a list of serializable structs to the end of the stream.
	pub fn append_list<T, K>(&mut self, t: &[K]) -> &mut Self
	where
		T: Serializable,
		K: Borrow<T>,
	{
		CompactInteger::from(t.len()).serialize(self);
		for i in t {
			i.borrow().serialize(self);
		}
		self
	}

	/// Full stream.
	pub fn out(self) -> Bytes {
		self.buffer.into()
	}
}

impl Write for Stream {
	#[inline]
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.buffer.write(buf)
	}

	#[inline]
	fn flush(&mut self) -> io::Result<()> {
		self.buffer.flush()
	}
}
