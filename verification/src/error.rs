use script::PayloadError;
use std::fmt;

/// Data needed for validation is not available right now; the caller may
/// retry once it is. Distinct from a validation reject.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Unavailable {
	/// Initial block download is still in progress.
	InitialBlockDownload,
	/// A block inside the scanned window has no body data (pruned).
	BlockData,
}

/// Reasons the hive proof validator rejects a block.
#[derive(Debug, PartialEq)]
pub enum HiveError {
	/// Previous block is not in the index.
	ParentNotFound,
	/// Hive is not yet enabled on the network.
	NotEnabled,
	/// Too many hive blocks without a pow block.
	TooManyConsecutive,
	/// Hive-mined block contains bee creation transactions.
	ContainsBct,
	/// First transaction is not a valid coinbase.
	BadCoinbase,
	/// Coinbase must carry exactly 2 or 3 outputs.
	WrongOutputCount,
	/// Coinbase payload is malformed.
	Payload(PayloadError),
	/// Bee does not meet the hash target.
	BeeHashAboveTarget,
	/// Honey output pays no extractable key id.
	BadHoneyAddress,
	/// Challenge signature cannot be recovered.
	SignatureInvalid,
	/// Recovered key does not match the honey destination.
	SignatureMismatch,
	/// Indicated BCT cannot be located.
	BctNotFound,
	/// Community contribution was indicated but not found.
	DonationNotFound,
	/// Donation pays the community fund an incorrect amount.
	DonationMismatch,
	/// Claimed BCT height conflicts with the found height.
	HeightMismatch,
	/// Indicated BCT is immature.
	BctImmature,
	/// Indicated BCT is too old.
	BctExpired,
	/// Indicated utxo is not a valid bee creation script.
	BadBctScript,
	/// BCT's honey address does not match the claimed honey address.
	HoneyAddressMismatch,
	/// BCT fee is less than the minimum possible bee cost.
	FeeBelowMinBeeCost,
	/// BCT fee is less than the cost of a single bee.
	FeeBelowBeeCost,
	/// BCT did not create enough bees for the claimed nonce.
	BeeNonceOutOfRange,
}

#[derive(Debug, PartialEq)]
pub enum Error {
	/// Chain data is temporarily unavailable.
	Unavailable(Unavailable),
	/// Hive proof rejected.
	Hive(HiveError),
}

impl From<HiveError> for Error {
	fn from(err: HiveError) -> Self {
		Error::Hive(err)
	}
}

impl From<Unavailable> for Error {
	fn from(err: Unavailable) -> Self {
		Error::Unavailable(err)
	}
}

impl fmt::Display for Unavailable {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Unavailable::InitialBlockDownload => "initial block download in progress".fmt(f),
			Unavailable::BlockData => "block data not available (pruned)".fmt(f),
		}
	}
}

impl fmt::Display for HiveError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			HiveError::ParentNotFound => "previous block is not in the index".fmt(f),
			HiveError::NotEnabled => "hive is not yet enabled on the network".fmt(f),
			HiveError::TooManyConsecutive => "too many hive blocks without a pow block".fmt(f),
			HiveError::ContainsBct => "hivemined block contains BCTs".fmt(f),
			HiveError::BadCoinbase => "coinbase tx is not valid".fmt(f),
			HiveError::WrongOutputCount => "coinbase must have 2 or 3 outputs".fmt(f),
			HiveError::Payload(ref err) => write!(f, "coinbase payload is malformed: {:?}", err),
			HiveError::BeeHashAboveTarget => "bee does not meet hash target".fmt(f),
			HiveError::BadHoneyAddress => "honey address is invalid".fmt(f),
			HiveError::SignatureInvalid => "couldn't recover pubkey from challenge signature".fmt(f),
			HiveError::SignatureMismatch => "challenge signature mismatch".fmt(f),
			HiveError::BctNotFound => "couldn't locate indicated BCT".fmt(f),
			HiveError::DonationNotFound => "community contrib was indicated but not found".fmt(f),
			HiveError::DonationMismatch => "BCT pays community fund an incorrect amount".fmt(f),
			HiveError::HeightMismatch => "claimed BCT height conflicts with found height".fmt(f),
			HiveError::BctImmature => "indicated BCT is immature".fmt(f),
			HiveError::BctExpired => "indicated BCT is too old".fmt(f),
			HiveError::BadBctScript => "indicated utxo is not a valid BCT script".fmt(f),
			HiveError::HoneyAddressMismatch => "BCT's honey address does not match claimed honey address".fmt(f),
			HiveError::FeeBelowMinBeeCost => "BCT fee is less than the minimum possible bee cost".fmt(f),
			HiveError::FeeBelowBeeCost => "BCT fee is less than the cost for a single bee".fmt(f),
			HiveError::BeeNonceOutOfRange => "BCT did not create enough bees for claimed nonce".fmt(f),
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::Unavailable(ref err) => write!(f, "data unavailable: {}", err),
			Error::Hive(ref err) => write!(f, "hive proof rejected: {}", err),
		}
	}
}

impl std::error::Error for Error {}
