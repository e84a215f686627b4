//! Minimal script model for the Maza consensus core.
//!
//! Only the patterns consensus code inspects are implemented: standard
//! output destinations, the bee-creation transaction script and the hive
//! coinbase payload. There is no interpreter here.

extern crate chain;
extern crate keys;
extern crate primitives;

mod bee;
mod builder;
mod opcode;
mod script;

pub use primitives::bytes;

pub use crate::bee::{bct_bee_fee, HiveCoinbasePayload, PayloadError};
pub use crate::builder::{script_for_address, Builder};
pub use crate::opcode::{Opcode, OP_FALSE, OP_TRUE};
pub use crate::script::{Script, ScriptAddress};
