//! Maza chain parameters registry.
//!
//! `ConsensusParams` carries every per-network consensus constant; a
//! process-wide copy is installed once with `select_params` and read with
//! `params`, mirroring the lifecycle of the reference implementation.

#[macro_use]
extern crate lazy_static;

extern crate chain;
extern crate keys;
extern crate primitives;
extern crate script;

mod consensus;
mod deployments;
mod network;

use parking_lot::RwLock;
use std::fmt;

pub use primitives::{compact, hash};

pub use crate::consensus::ConsensusParams;
pub use crate::deployments::{Deployment, DeploymentPos, ALWAYS_ACTIVE, NO_TIMEOUT};
pub use crate::network::{Magic, Network};

#[derive(Debug, PartialEq)]
pub enum Error {
	/// Chain name is not one of "main", "test", "regtest".
	UnknownChain(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match *self {
			Error::UnknownChain(ref chain) => write!(f, "Unknown chain {}", chain),
		}
	}
}

impl std::error::Error for Error {}

lazy_static! {
	static ref GLOBAL_PARAMS: RwLock<Option<ConsensusParams>> = RwLock::new(None);
}

/// Creates parameters for the named chain.
pub fn create_params(chain: &str) -> Result<ConsensusParams, Error> {
	match chain {
		"main" => Ok(ConsensusParams::new(Network::Mainnet)),
		"test" => Ok(ConsensusParams::new(Network::Testnet)),
		"regtest" => Ok(ConsensusParams::new(Network::Regtest)),
		other => Err(Error::UnknownChain(other.to_owned())),
	}
}

/// Installs the process-wide parameters. May be called exactly once.
pub fn select_params(chain: &str) -> Result<(), Error> {
	let params = create_params(chain)?;
	let mut global = GLOBAL_PARAMS.write();
	if global.is_some() {
		panic!("chain parameters are selected once per process");
	}
	*global = Some(params);
	Ok(())
}

/// The active chain parameters. Reading before `select_params` is a
/// programmer error.
pub fn params() -> ConsensusParams {
	GLOBAL_PARAMS
		.read()
		.clone()
		.expect("params() called before select_params()")
}

/// Mutates a deployment window of the active parameters. Test-only in
/// spirit, but part of the public registry surface.
pub fn update_versionbits_parameters(pos: DeploymentPos, start_time: i64, timeout: i64) {
	let mut global = GLOBAL_PARAMS.write();
	let params = global.as_mut().expect("params() called before select_params()");
	params.update_versionbits_parameters(pos, start_time, timeout);
}

/// Drops the installed parameters so another chain can be selected.
#[cfg(feature = "test-helpers")]
pub fn reset_params() {
	*GLOBAL_PARAMS.write() = None;
}

#[cfg(test)]
mod tests {
	use super::{create_params, params, select_params, update_versionbits_parameters, DeploymentPos, Error, Network};

	#[test]
	fn test_create_params_unknown_chain() {
		assert_eq!(create_params("signet").unwrap_err(), Error::UnknownChain("signet".to_owned()));
	}

	// The singleton can be installed only once per process, so its whole
	// lifecycle lives in one test.
	#[test]
	fn test_singleton_lifecycle() {
		select_params("test").unwrap();

		let installed = params();
		assert_eq!(installed.network, Network::Testnet);

		update_versionbits_parameters(DeploymentPos::Segwit, 7, 11);
		let mutated = params().segwit_deployment.unwrap();
		assert_eq!(mutated.start_time, 7);
		assert_eq!(mutated.timeout, 11);

		// the table keeps unrelated deployments intact
		assert_eq!(params().csv_deployment.unwrap().start_time, 1_639_090_000);
	}
}
