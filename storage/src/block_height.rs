use bitcrypto::SHA256D;

/// Best block reference: the canonical tip's number and hash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockHeight {
	pub number: u32,
	pub hash: SHA256D,
}
