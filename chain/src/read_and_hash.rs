use bitcrypto::{dhash256, SHA256D};
use ser::{Deserializable, Error as ReaderError, Reader};
use std::io;

pub struct HashedData<T> {
	pub size: usize,
	pub hash: SHA256D,
	pub data: T,
}

pub trait ReadAndHash {
	fn read_and_hash<T>(&mut self) -> Result<HashedData<T>, ReaderError>
	where
		T: Deserializable;
}

impl<R> ReadAndHash for Reader<R>
where
	R: io::Read,
{
	fn read_and_hash<T>(&mut self) -> Result<HashedData<T>, ReaderError>
	where
		T: Deserializable,
	{
		let mut raw = Vec::new();
		let data = self.read_with_proxy(|bytes| {
			raw.extend_from_slice(bytes);
		})?;

		let result = HashedData {
			hash: dhash256(&raw),
			size: raw.len(),
			data,
		};

		Ok(result)
	}
}
