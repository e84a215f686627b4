extern crate byteorder;
extern crate primitives;

mod compact_integer;
mod impls;
mod reader;
mod stream;

pub use primitives::{bytes, compact, hash};

pub use crate::compact_integer::CompactInteger;
pub use crate::reader::{deserialize, Deserializable, Error, Reader};
pub use crate::stream::{serialize, serialized_list_size, Serializable, Stream};
