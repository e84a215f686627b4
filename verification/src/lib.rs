//! Maza consensus verification.
//!
//! Four proof-of-work retarget regimes coexist, selected by height,
//! algorithm tag and fork state: the legacy retargeter, DarkGravityWave,
//! per-algorithm LWMA after the MinotaurX fork, and the hive bee-target for
//! hive-mined blocks. Alongside them live the compact-target range check,
//! the network bee census and the hive proof validator.
//!
//! Everything here is a pure function over caller-supplied chain-view
//! traits; the caller keeps the view stable (holds the chain lock) for the
//! duration of a call.

#[macro_use]
extern crate log;

extern crate chain;
extern crate network;
extern crate primitives;
extern crate serialization as ser;
extern crate storage;

mod constants;
mod deployments;
mod error;
mod hive_census;
mod hive_proof;
mod subsidy;
mod work;
mod work_dgw;
mod work_hive;
mod work_lwma;

pub use crate::constants::{BEE_POP_GRAPH_SIZE, DGW_PAST_BLOCKS};
pub use crate::deployments::is_minotaurx_enabled;
pub use crate::error::{Error, HiveError, Unavailable};
pub use crate::hive_census::{network_hive_info, BeePopGraph, BeePopGraphPoint, HiveCensus};
pub use crate::hive_proof::{deterministic_rand_string, verify_hive_proof, MinotaurHasher};
pub use crate::subsidy::{bee_cost, block_subsidy};
pub use crate::work::{check_proof_of_work, hash_to_u256, work_required};
pub use crate::work_dgw::work_required_dgw;
pub use crate::work_hive::work_required_hive;
pub use crate::work_lwma::work_required_lwma;
