use keys::Address;
use network::ConsensusParams;
use script::{bct_bee_fee, script_for_address};
use storage::{BlockRef, Store};

use crate::constants::BEE_POP_GRAPH_SIZE;
use crate::deployments::is_minotaurx_enabled;
use crate::error::{Error, Unavailable};
use crate::subsidy::{bee_cost, block_subsidy};

/// One block's worth of bee population.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BeePopGraphPoint {
	pub immature_pop: u64,
	pub mature_pop: u64,
}

/// Fixed-capacity bee population graph. Recomputed on demand under the
/// chain lock; never persisted.
pub struct BeePopGraph {
	points: Box<[BeePopGraphPoint]>,
}

impl Default for BeePopGraph {
	fn default() -> Self {
		BeePopGraph::new()
	}
}

impl BeePopGraph {
	pub fn new() -> Self {
		BeePopGraph {
			points: vec![BeePopGraphPoint::default(); BEE_POP_GRAPH_SIZE].into_boxed_slice(),
		}
	}

	pub fn point(&self, index: usize) -> &BeePopGraphPoint {
		&self.points[index]
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	fn zero(&mut self, len: usize) {
		for point in self.points[..len].iter_mut() {
			*point = BeePopGraphPoint::default();
		}
	}
}

/// Counts of bees and bee creation transactions over the last full
/// gestation + lifespan window.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HiveCensus {
	pub immature_bees: u64,
	pub immature_bcts: u32,
	pub mature_bees: u64,
	pub mature_bcts: u32,
	pub potential_lifespan_rewards: u64,
}

/// Walks the recent block window counting live and gestating bees on the
/// network, optionally repopulating the population graph.
///
/// Fails with a transient error while the initial block download is in
/// progress or when a scanned block's data has been pruned.
pub fn network_hive_info(
	store: &dyn Store,
	consensus: &ConsensusParams,
	graph: &mut BeePopGraph,
	recalc_graph: bool,
	initial_block_download: bool,
) -> Result<HiveCensus, Error> {
	let total_bee_lifespan = (consensus.bee_lifespan_blocks + consensus.bee_gestation_blocks) as usize;
	let tip_height = store.best_block().number;

	// hive-era block reward carries the 50% boost
	let mut block_reward = block_subsidy(tip_height, consensus);
	block_reward += block_reward >> 1;

	let potential_lifespan_rewards =
		consensus.bee_lifespan_blocks as u64 * block_reward / consensus.hive_block_spacing_target_typical_1_1 as u64;

	if recalc_graph {
		graph.zero(total_bee_lifespan);
	}

	if initial_block_download {
		warn!(target: "hive", "network_hive_info: refusing while initial block download is in progress");
		return Err(Error::Unavailable(Unavailable::InitialBlockDownload));
	}

	let mut census = HiveCensus {
		potential_lifespan_rewards,
		..Default::default()
	};

	let bcf_script = consensus.bee_creation_address.parse::<Address>().ok().map(|a| script_for_address(&a));
	let cf_script = consensus.hive_community_address.parse::<Address>().ok().map(|a| script_for_address(&a));

	let mut height = tip_height;
	for i in 0..total_bee_lifespan {
		let header = store
			.block_header(BlockRef::Number(height))
			.expect("the canonical chain has headers for every height up to the tip; qed");

		// hive-mined blocks carry no BCTs, skip the body read
		if !header.raw.is_hive_mined(consensus.hive_nonce_marker) {
			let block = match store.block(BlockRef::Number(height)) {
				Some(block) => block,
				None => {
					warn!(target: "hive", "network_hive_info: block {} not available; can't calculate network bee count", height);
					return Err(Error::Unavailable(Unavailable::BlockData));
				}
			};

			let block_height = height;
			let cost = bee_cost(block_height, consensus);

			for tx in &block.transactions {
				let mut bee_fee_paid = match bcf_script.as_ref().and_then(|bcf| bct_bee_fee(&tx.raw, bcf)) {
					Some(fee) => fee,
					None => continue,
				};

				// community fund contribution, if present, must carry the
				// exact expected donation
				let donates_to_fund = tx.raw.outputs.len() > 1
					&& cf_script
						.as_ref()
						.map_or(false, |cf| tx.raw.outputs[1].script_pubkey[..] == cf[..]);
				if donates_to_fund {
					let donation = tx.raw.outputs[1].value;
					let mut expected = (bee_fee_paid + donation) / consensus.community_contrib_factor;
					if is_minotaurx_enabled(&header.raw, consensus) {
						expected += expected >> 1;
					}
					if donation != expected {
						continue;
					}
					bee_fee_paid += donation;
				}

				let bee_count = bee_fee_paid / cost;
				if i < consensus.bee_gestation_blocks as usize {
					census.immature_bees += bee_count;
					census.immature_bcts += 1;
				} else {
					census.mature_bees += bee_count;
					census.mature_bcts += 1;
				}

				if recalc_graph {
					let born = block_height as i64;
					let matures = born + consensus.bee_gestation_blocks as i64;
					let dies = matures + consensus.bee_lifespan_blocks as i64;
					for j in born..dies {
						let graph_pos = j - tip_height as i64;
						if graph_pos > 0 && (graph_pos as usize) < total_bee_lifespan {
							if j < matures {
								graph.points[graph_pos as usize].immature_pop += bee_count;
							} else {
								graph.points[graph_pos as usize].mature_pop += bee_count;
							}
						}
					}
				}
			}
		}

		// ran out of ancestors
		if height == 0 {
			return Ok(census);
		}
		height -= 1;
	}

	Ok(census)
}
