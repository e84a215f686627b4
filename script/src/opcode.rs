//! Script opcodes the consensus core manipulates.

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[allow(non_camel_case_types)]
pub enum Opcode {
	/// Push an empty array onto the stack. Doubles as `OP_FALSE`.
	OP_0 = 0x00,
	/// The next byte contains the number of bytes to be pushed.
	OP_PUSHDATA1 = 0x4c,
	/// The next two bytes contain the number of bytes to be pushed.
	OP_PUSHDATA2 = 0x4d,
	/// The next four bytes contain the number of bytes to be pushed.
	OP_PUSHDATA4 = 0x4e,
	/// The number 1 is pushed. Doubles as `OP_TRUE`.
	OP_1 = 0x51,
	/// Marks the output as unspendable.
	OP_RETURN = 0x6a,
	OP_DUP = 0x76,
	OP_EQUAL = 0x87,
	OP_EQUALVERIFY = 0x88,
	OP_HASH160 = 0xa9,
	OP_CHECKSIG = 0xac,
	/// Marks a hive-mined coinbase payload (first unassigned opcode after OP_NOP10).
	OP_BEE = 0xba,
}

pub const OP_FALSE: Opcode = Opcode::OP_0;
pub const OP_TRUE: Opcode = Opcode::OP_1;

impl From<Opcode> for u8 {
	fn from(opcode: Opcode) -> Self {
		opcode as u8
	}
}
