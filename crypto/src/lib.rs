#[macro_use]
extern crate bitcoin_hashes;

pub use bitcoin_hashes::core::str::FromStr;
use bitcoin_hashes::hash160;
pub use bitcoin_hashes::hex::Error as HexError;
pub use bitcoin_hashes::hex::FromHex;
pub use bitcoin_hashes::Hash;
pub use bitcoin_hashes::HashEngine;
use bitcoin_hashes::{sha256, sha256d};

hash_newtype!(
	SHA256,
	sha256::Hash,
	32,
	doc = "SHA256 newtype wrapper of bitcoin_hashes::sha256::Hash"
);

#[inline]
pub fn sha256(input: &[u8]) -> SHA256 {
	SHA256(sha256::Hash::hash(input))
}

hash_newtype!(
	HASH160,
	hash160::Hash,
	20,
	doc = "HASH160 newtype wrapper of bitcoin_hashes::hash160::Hash"
);

#[inline]
pub fn dhash160(input: &[u8]) -> HASH160 {
	HASH160(hash160::Hash::hash(input))
}

hash_newtype!(
	SHA256D,
	sha256d::Hash,
	32,
	doc = "SHA256D newtype wrapper of bitcoin_hashes::sha256d::Hash"
);

#[inline]
pub fn dhash256(input: &[u8]) -> SHA256D {
	SHA256D(sha256d::Hash::hash(input))
}

/// A lot of tests use hashes in the form of already reversed hex strings. SHA256D from_str/from_hex impl reverses the
/// order and we don't want to do that if it's already reversed. This trait should only be used for this one hash type.
pub trait FromInnerHex {
	fn from_inner_hex(hex: &str) -> Result<SHA256D, HexError>;
}

impl FromInnerHex for SHA256D {
	fn from_inner_hex(hex: &str) -> Result<SHA256D, HexError> {
		Ok(SHA256D::from_inner(FromHex::from_hex(hex)?))
	}
}

#[cfg(test)]
mod tests {
	use super::{dhash160, dhash256, sha256, FromStr};
	use crate::{HASH160, SHA256, SHA256D};

	#[test]
	fn test_sha256() {
		let expected = SHA256::from_str("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824").unwrap();
		let result = sha256(b"hello");
		assert_eq!(result, expected);
	}

	#[test]
	fn test_dhash160() {
		let expected = HASH160::from_str("b6a9c8c230722b7c748331a8b450f05566dc7d0f").unwrap();
		let result = dhash160(b"hello");
		assert_eq!(result, expected);
	}

	#[test]
	fn test_dhash256() {
		let expected = SHA256D::from_str("503d8319a48348cdc610a582f7bf754b5833df65038606eb48510790dfc99595").unwrap();
		let result = dhash256(b"hello");
		assert_eq!(result, expected);
	}
}
