use crate::U256;

/// Compact representation of a 256-bit target threshold.
///
/// The format packs an exponent byte and a 3-byte mantissa; the high bit of
/// the mantissa is a sign flag. Targets whose mantissa would exceed the
/// 256-bit range decode with the overflow flag raised.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Compact(u32);

impl From<u32> for Compact {
	fn from(u: u32) -> Self {
		Compact(u)
	}
}

impl From<Compact> for u32 {
	fn from(c: Compact) -> Self {
		c.0
	}
}

impl Compact {
	pub const fn new(u: u32) -> Self {
		Compact(u)
	}

	pub fn max_value() -> Self {
		U256::max_value().into()
	}

	/// Computes the target [0, T] that a hash must not exceed.
	///
	/// Returns `Err` carrying the decoded magnitude when the compact form is
	/// negative or overflows 256 bits.
	pub fn to_u256(&self) -> Result<U256, U256> {
		let size = self.0 >> 24;
		let mut word = self.0 & 0x007f_ffff;

		let result = if size <= 3 {
			word >>= 8 * (3 - size);
			word.into()
		} else {
			U256::from(word) << (8 * (size - 3))
		};

		let is_negative = word != 0 && (self.0 & 0x0080_0000) != 0;
		let is_overflow = word != 0 && ((size > 34) || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

		if is_negative || is_overflow {
			Err(result)
		} else {
			Ok(result)
		}
	}

	pub fn from_u256(val: U256) -> Self {
		let mut size = (val.bits() + 7) / 8;
		let mut compact = if size <= 3 {
			(val.low_u64() << (8 * (3 - size))) as u32
		} else {
			let bn = val >> (8 * (size - 3));
			bn.low_u64() as u32
		};

		if (compact & 0x0080_0000) != 0 {
			compact >>= 8;
			size += 1;
		}

		assert_eq!(compact & !0x007f_ffff, 0);
		assert!(size < 256);
		Compact(compact | (size as u32) << 24)
	}
}

impl From<U256> for Compact {
	fn from(u: U256) -> Self {
		Compact::from_u256(u)
	}
}

impl From<Compact> for U256 {
	fn from(c: Compact) -> Self {
		// ignore negative and overflow flags
		c.to_u256().unwrap_or_else(|t| t)
	}
}

#[cfg(test)]
mod tests {
	use super::{Compact, U256};

	#[test]
	fn test_compact_to_u256() {
		assert_eq!(Compact::new(0x01003456).to_u256(), Ok(0.into()));
		assert_eq!(Compact::new(0x01123456).to_u256(), Ok(0x12.into()));
		assert_eq!(Compact::new(0x02008000).to_u256(), Ok(0x80.into()));
		assert_eq!(Compact::new(0x05009234).to_u256(), Ok(0x92340000u64.into()));

		// negative -0x12345600
		assert!(Compact::new(0x04923456).to_u256().is_err());
		assert_eq!(Compact::new(0x04123456).to_u256(), Ok(0x12345600u64.into()));
	}

	#[test]
	fn test_from_u256() {
		let test1 = U256::from(1000u64);
		assert_eq!(Compact::new(0x0203e800), Compact::from_u256(test1));

		let test2 = U256::from(2).pow(U256::from(256 - 32)) - U256::from(1);
		assert_eq!(Compact::new(0x1d00ffff), Compact::from_u256(test2));
	}

	#[test]
	fn test_compact_zero_roundtrip() {
		assert_eq!(Compact::new(0), Compact::from_u256(U256::zero()));
		assert_eq!(Compact::new(0).to_u256(), Ok(U256::zero()));
	}

	#[test]
	fn test_compact_overflowing_sizes() {
		// mantissa pushed past 256 bits in every encodable way
		assert!(Compact::new(0x23000001).to_u256().is_err());
		assert!(Compact::new(0x22000100).to_u256().is_err());
		assert!(Compact::new(0x21010000).to_u256().is_err());
		assert!(Compact::new(0xff123456).to_u256().is_err());
		// largest legal exponent for a 1-byte mantissa
		assert!(Compact::new(0x22000001).to_u256().is_ok());
	}

	#[test]
	fn test_compact_roundtrip_is_identity() {
		let targets = [
			U256::from(1u64),
			U256::from(0x7fffu64),
			U256::from(0x8000u64),
			U256::from(0x12345678u64),
			"00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
			"000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
			"0fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
			"7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff".parse().unwrap(),
		];

		for target in &targets {
			// only the top 24 mantissa bits survive the encoding, so
			// canonicalize before comparing
			let compact = Compact::from_u256(*target);
			let decoded = compact.to_u256().unwrap();
			assert_eq!(Compact::from_u256(decoded), compact);
		}
	}

	#[test]
	fn test_compact_roundtrip_exact_mantissa() {
		// values exactly representable in compact form decode back bit-for-bit
		let exact: &[U256] = &[
			0x12u64.into(),
			0x123400u64.into(),
			U256::from(0x7fffffu64) << 200,
		];
		for target in exact {
			assert_eq!(Compact::from_u256(*target).to_u256(), Ok(*target));
		}
	}
}
