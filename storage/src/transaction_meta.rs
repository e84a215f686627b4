use bit_vec::BitVec;

/// Location and spend state of a stored transaction. Bit 0 marks a
/// coinbase; bit `n + 1` marks output `n` as spent.
#[derive(Debug, Clone)]
pub struct TransactionMeta {
	block_height: u32,
	bits: BitVec,
}

impl TransactionMeta {
	pub fn new(block_height: u32, outputs: usize) -> Self {
		TransactionMeta {
			block_height,
			bits: BitVec::from_elem(outputs + 1, false),
		}
	}

	pub fn new_coinbase(block_height: u32, outputs: usize) -> Self {
		let mut result = Self::new(block_height, outputs);
		result.bits.set(0, true);
		result
	}

	pub fn is_coinbase(&self) -> bool {
		self.bits.get(0).expect("one bit is always stored; qed")
	}

	pub fn height(&self) -> u32 {
		self.block_height
	}

	pub fn note_used(&mut self, index: usize) {
		self.bits.set(index + 1, true);
	}

	pub fn denote_used(&mut self, index: usize) {
		self.bits.set(index + 1, false);
	}

	pub fn is_spent(&self, idx: usize) -> Option<bool> {
		self.bits.get(idx + 1)
	}

	pub fn is_fully_spent(&self) -> bool {
		self.bits.iter().skip(1).all(|spent| spent)
	}
}
