use bitcrypto::{dhash256, SHA256D};
use chain::{IndexedBlock, IndexedBlockHeader, OutPoint, Transaction};
use keys::{Address, Public, Type};
use network::ConsensusParams;
use primitives::U256;
use script::{bct_bee_fee, script_for_address, HiveCoinbasePayload, Script};
use ser::{serialize, Stream};
use storage::{BlockAncestors, BlockProvider, BlockRef, Store};

use crate::deployments::is_minotaurx_enabled;
use crate::error::{Error, HiveError};
use crate::subsidy::bee_cost;
use crate::work::hash_to_u256;
use crate::work_hive::work_required_hive;

/// MinotaurX hashing is provided by an external collaborator; the validator
/// only needs the arbitrary-input form.
pub trait MinotaurHasher {
	fn minotaur_hash_arbitrary(&self, data: &[u8]) -> SHA256D;
}

/// Deterministic challenge string for the child of `parent`, derived from
/// the parent's identity alone so every validator reproduces it.
pub fn deterministic_rand_string(parent: &IndexedBlockHeader, parent_height: u32) -> String {
	let mut stream = Stream::default();
	stream.append(&parent_height).append(&parent.hash);
	dhash256(&stream.out()).to_string()
}

/// Validates the hive proof carried by a non-PoW block: the coinbase
/// payload, the bee-hash puzzle against the current bee target, the honey
/// key's signature over the deterministic challenge, and the maturity and
/// capacity of the referenced bee creation transaction.
pub fn verify_hive_proof(
	block: &IndexedBlock,
	store: &dyn Store,
	hasher: &dyn MinotaurHasher,
	consensus: &ConsensusParams,
) -> Result<(), Error> {
	let parent_height = store
		.block_number(&block.header.raw.previous_header_hash)
		.ok_or(HiveError::ParentNotFound)?;
	let parent = store
		.block_header(BlockRef::Number(parent_height))
		.ok_or(HiveError::ParentNotFound)?;
	let block_height = parent_height + 1;
	trace!(target: "hive", "verify_hive_proof: height = {}", block_height);

	if !is_minotaurx_enabled(&parent.raw, consensus) {
		return Err(HiveError::NotEnabled.into());
	}

	// limit consecutive hive blocks
	let hive_blocks_at_tip = BlockAncestors::new(BlockRef::Hash(parent.hash), store.as_block_header_provider())
		.take_while(|header| header.raw.is_hive_mined(consensus.hive_nonce_marker))
		.count() as u32;
	if hive_blocks_at_tip >= consensus.max_consecutive_hive_blocks {
		return Err(HiveError::TooManyConsecutive.into());
	}

	// the block must not carry any BCTs itself
	let bcf_address: Address = consensus
		.bee_creation_address
		.parse()
		.expect("bee creation address in chain params is valid; qed");
	let bcf_script = script_for_address(&bcf_address);
	for tx in block.transactions.iter().skip(1) {
		if bct_bee_fee(&tx.raw, &bcf_script).is_some() {
			return Err(HiveError::ContainsBct.into());
		}
	}

	// the coinbase carries the proof
	let coinbase = block.transactions.get(0).ok_or(HiveError::BadCoinbase)?;
	if !coinbase.raw.is_coinbase() {
		return Err(HiveError::BadCoinbase.into());
	}
	if coinbase.raw.outputs.len() < 2 || coinbase.raw.outputs.len() > 3 {
		return Err(HiveError::WrongOutputCount.into());
	}

	let payload_script = Script::new(coinbase.raw.outputs[0].script_pubkey.clone());
	let payload = HiveCoinbasePayload::from_script(&payload_script).map_err(HiveError::Payload)?;
	trace!(
		target: "hive",
		"verify_hive_proof: bee_nonce = {}, claimed_height = {}, community_contrib = {}, bct_txid = {}",
		payload.bee_nonce,
		payload.bct_claimed_height,
		payload.community_contrib,
		payload.bct_txid
	);

	// the bee hash must meet the current bee hash target
	let deterministic_rand = deterministic_rand_string(&parent, parent_height);
	let bee_hash_target: U256 = work_required_hive(&parent, store.as_block_header_provider(), consensus).into();
	let challenge = format!("{}{}{}", deterministic_rand, payload.bct_txid, payload.bee_nonce);
	let bee_hash = hash_to_u256(&hasher.minotaur_hash_arbitrary(challenge.as_bytes()));
	if bee_hash >= bee_hash_target {
		return Err(HiveError::BeeHashAboveTarget.into());
	}

	// honey destination must be a plain key id
	let honey_script = Script::new(coinbase.raw.outputs[1].script_pubkey.clone());
	let honey_destination = honey_script.extract_destination().ok_or(HiveError::BadHoneyAddress)?;
	if honey_destination.kind != Type::P2PKH {
		return Err(HiveError::BadHoneyAddress.into());
	}

	// the honey key signs the deterministic challenge
	let message = dhash256(&serialize(&deterministic_rand));
	let public = Public::recover_compact(&message, &payload.signature).map_err(|_| HiveError::SignatureInvalid)?;
	if public.address_hash() != honey_destination.hash {
		return Err(HiveError::SignatureMismatch.into());
	}

	// locate the BCT: the UTXO set first (the usual path for incoming
	// blocks), then a drill into the indicated block
	let out_bee_creation = OutPoint {
		hash: payload.bct_txid,
		index: 0,
	};
	let out_comm_fund = OutPoint {
		hash: payload.bct_txid,
		index: 1,
	};

	let coins = store.as_transaction_output_provider();
	let mut bct: Option<Transaction> = None;
	let bct_found_height;
	let mut bct_value;
	let bct_script;

	if let Some(coin) = coins.transaction_output(&out_bee_creation) {
		let meta = store
			.as_transaction_meta_provider()
			.transaction_meta(&payload.bct_txid)
			.ok_or(HiveError::BctNotFound)?;
		bct_found_height = meta.height();
		bct_value = coin.value;
		bct_script = Script::new(coin.script_pubkey);
	} else {
		trace!(target: "hive", "verify_hive_proof: using deep drill for the bee creation output");
		let tx = transaction_at_height(store.as_block_provider(), &payload.bct_txid, payload.bct_claimed_height)
			.ok_or(HiveError::BctNotFound)?;
		bct_found_height = payload.bct_claimed_height;
		bct_value = tx.outputs.get(0).ok_or(HiveError::BadBctScript)?.value;
		bct_script = Script::new(tx.outputs[0].script_pubkey.clone());
		bct = Some(tx);
	}

	if payload.community_contrib {
		let cf_address: Address = consensus
			.hive_community_address
			.parse()
			.expect("community fund address in chain params is valid; qed");
		let cf_script = script_for_address(&cf_address);
		let mut donation = None;

		if bct.is_none() {
			if let Some(coin) = coins.transaction_output(&out_comm_fund) {
				if coin.script_pubkey[..] != cf_script[..] {
					return Err(HiveError::DonationNotFound.into());
				}
				donation = Some(coin.value);
			} else {
				trace!(target: "hive", "verify_hive_proof: using deep drill for the community fund output");
				let tx = transaction_at_height(store.as_block_provider(), &payload.bct_txid, payload.bct_claimed_height)
					.ok_or(HiveError::BctNotFound)?;
				bct = Some(tx);
			}
		}

		// When the donation came from the UTXO set the BCT reference stays
		// empty and this re-check is skipped.
		if let Some(ref tx) = bct {
			if tx.outputs.len() < 2 || tx.outputs[1].script_pubkey[..] != cf_script[..] {
				return Err(HiveError::DonationNotFound.into());
			}
			donation = Some(tx.outputs[1].value);
		}

		let donation = donation.expect("set from the utxo set or the drilled BCT; qed");
		let mut expected = (bct_value + donation) / consensus.community_contrib_factor;
		expected += expected >> 1;
		if donation != expected {
			return Err(HiveError::DonationMismatch.into());
		}

		bct_value += donation;
	}

	if bct_found_height != payload.bct_claimed_height {
		return Err(HiveError::HeightMismatch.into());
	}

	// bee maturity window
	let bct_depth = block_height as i64 - bct_found_height as i64;
	if bct_depth < consensus.bee_gestation_blocks as i64 {
		return Err(HiveError::BctImmature.into());
	}
	if bct_depth > consensus.bee_gestation_blocks as i64 + consensus.bee_lifespan_blocks as i64 {
		return Err(HiveError::BctExpired.into());
	}

	// the BCT must follow the bee creation pattern and commit to the same
	// honey destination as the coinbase
	let bct_honey_script = bct_script.is_bee_creation(&bcf_script).ok_or(HiveError::BadBctScript)?;
	let bct_honey_destination = bct_honey_script.extract_destination().ok_or(HiveError::BadBctScript)?;
	if bct_honey_destination != honey_destination {
		return Err(HiveError::HoneyAddressMismatch.into());
	}

	// enough bees must have been bought to include the claimed nonce
	let cost = bee_cost(bct_found_height, consensus);
	if bct_value < consensus.min_bee_cost {
		return Err(HiveError::FeeBelowMinBeeCost.into());
	}
	if bct_value < cost {
		return Err(HiveError::FeeBelowBeeCost.into());
	}
	let bee_count = bct_value / cost;
	if payload.bee_nonce as u64 >= bee_count {
		return Err(HiveError::BeeNonceOutOfRange.into());
	}

	trace!(target: "hive", "verify_hive_proof: pass at {}", block_height);
	Ok(())
}

fn transaction_at_height(store: &dyn BlockProvider, hash: &SHA256D, height: u32) -> Option<Transaction> {
	let block = store.block(BlockRef::Number(height))?;
	block.transactions.iter().find(|tx| tx.hash == *hash).map(|tx| tx.raw.clone())
}


#[cfg(test)]
mod tests {
	use super::{deterministic_rand_string, verify_hive_proof, MinotaurHasher};
	use crate::error::{Error, HiveError};
	use crate::subsidy::bee_cost;
	use bitcrypto::{dhash256, FromStr, SHA256D};
	use chain::{IndexedBlock, IndexedBlockHeader, OutPoint, Transaction, TransactionInput, TransactionOutput};
	use keys::generator::{Generator, Random};
	use keys::{Address, KeyPair};
	use network::{ConsensusParams, Network};
	use script::{script_for_address, Builder, HiveCoinbasePayload, Opcode, PayloadError, Script};
	use ser::serialize;
	use storage::Store;
	use test_data::{block_builder, MemoryStore};

	/// Collaborator stub returning a tiny bee hash: always under the target.
	struct WinningHasher;

	impl MinotaurHasher for WinningHasher {
		fn minotaur_hash_arbitrary(&self, _data: &[u8]) -> SHA256D {
			SHA256D::from_str("0000000000000000000000000000000000000000000000000000000000000001").unwrap()
		}
	}

	/// Collaborator stub returning a bee hash no target can cover.
	struct LosingHasher;

	impl MinotaurHasher for LosingHasher {
		fn minotaur_hash_arbitrary(&self, _data: &[u8]) -> SHA256D {
			SHA256D::from_str("ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff").unwrap()
		}
	}

	struct Fixture {
		consensus: ConsensusParams,
		store: MemoryStore,
		key_pair: KeyPair,
		bct_txid: SHA256D,
	}

	fn honey_script(key_pair: &KeyPair) -> Script {
		Builder::build_p2pkh(&key_pair.public().address_hash())
	}

	fn bct_transaction(consensus: &ConsensusParams, key_pair: &KeyPair, fee: u64, donation: Option<u64>) -> Transaction {
		let bcf_address: Address = consensus.bee_creation_address.parse().unwrap();
		let bcf = script_for_address(&bcf_address);

		let bct_script = Builder::default()
			.append_script(&bcf)
			.push_opcode(Opcode::OP_RETURN)
			.push_data(&honey_script(key_pair))
			.into_script();

		let mut outputs = vec![TransactionOutput {
			value: fee,
			script_pubkey: bct_script.to_bytes(),
		}];
		if let Some(donation) = donation {
			let cf_address: Address = consensus.hive_community_address.parse().unwrap();
			outputs.push(TransactionOutput {
				value: donation,
				script_pubkey: script_for_address(&cf_address).to_bytes(),
			});
		}

		Transaction {
			version: 1,
			inputs: vec![TransactionInput {
				previous_output: OutPoint {
					hash: dhash256(b"funding"),
					index: 0,
				},
				script_sig: Default::default(),
				sequence: 0,
			}],
			outputs,
			lock_time: 0,
		}
	}

	/// Chain of `len` post-fork blocks carrying `bct` in block 1. The BCT
	/// buys 2 bees unless a (fee, donation) pair is supplied.
	fn fixture(len: u32, fee_and_donation: Option<(u64, Option<u64>)>) -> Fixture {
		let consensus = ConsensusParams::new(Network::Testnet);
		let key_pair = Random::new(keys::Network::Testnet).generate().unwrap();

		let (fee, donation) = fee_and_donation.unwrap_or((2 * bee_cost(1, &consensus), None));
		let bct = bct_transaction(&consensus, &key_pair, fee, donation);
		let bct_txid = bct.hash();

		let mut store = MemoryStore::new();
		let mut parent_hash = SHA256D::default();
		for height in 0..len {
			let mut builder = block_builder()
				.time(consensus.pow_fork_time + height * 120)
				.parent(parent_hash)
				.coinbase(height);
			if height == 1 {
				builder = builder.transaction(bct.clone());
			}
			let block = builder.build();
			parent_hash = block.header.hash;
			store.insert(block);
		}

		Fixture {
			consensus,
			store,
			key_pair,
			bct_txid,
		}
	}

	/// (fee, donation) pair satisfying the boosted community fund formula:
	/// donation == 1.5 * (fee + donation) / 10. The pot buys 20 bees.
	fn matching_donation(consensus: &ConsensusParams) -> (u64, u64) {
		let total = 20 * bee_cost(1, consensus);
		let donation = total / 10 + (total / 10 >> 1);
		(total - donation, donation)
	}

	impl Fixture {
		fn parent(&self) -> IndexedBlockHeader {
			self.store.best_header()
		}

		fn payload(&self, bee_nonce: u32, claimed_height: u32, community_contrib: bool, signer: &KeyPair) -> HiveCoinbasePayload {
			let parent_height = self.store.best_block().number;
			let deterministic_rand = deterministic_rand_string(&self.parent(), parent_height);
			let message = dhash256(&serialize(&deterministic_rand));
			let signature = signer.private().sign_compact(&message).unwrap();

			HiveCoinbasePayload {
				bee_nonce,
				bct_claimed_height: claimed_height,
				community_contrib,
				bct_txid: self.bct_txid,
				signature,
			}
		}

		fn candidate_with_script(&self, payload_script: Script, extra: Option<Transaction>) -> IndexedBlock {
			let parent = self.parent();
			let coinbase = Transaction {
				version: 1,
				inputs: vec![TransactionInput::coinbase(Default::default())],
				outputs: vec![
					TransactionOutput {
						value: 0,
						script_pubkey: payload_script.to_bytes(),
					},
					TransactionOutput {
						value: 7500,
						script_pubkey: honey_script(&self.key_pair).to_bytes(),
					},
				],
				lock_time: 0,
			};

			let mut builder = block_builder()
				.time(parent.raw.time + 120)
				.parent(parent.hash)
				.nonce(self.consensus.hive_nonce_marker)
				.transaction(coinbase);
			if let Some(extra) = extra {
				builder = builder.transaction(extra);
			}
			builder.build()
		}

		fn candidate(&self, bee_nonce: u32, claimed_height: u32, community_contrib: bool) -> IndexedBlock {
			let payload = self.payload(bee_nonce, claimed_height, community_contrib, &self.key_pair);
			self.candidate_with_script(payload.to_script(), None)
		}

		fn verify(&self, block: &IndexedBlock) -> Result<(), Error> {
			verify_hive_proof(block, &self.store, &WinningHasher, &self.consensus)
		}
	}

	#[test]
	fn test_hive_proof_accepts_valid_block() {
		// BCT at height 1, candidate lands exactly at gestation depth
		let fixture = fixture(41, None);
		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Ok(()));
	}

	#[test]
	fn test_hive_proof_rejects_immature_bct() {
		// one block short of gestation depth
		let fixture = fixture(40, None);
		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::BctImmature)));
	}

	#[test]
	fn test_hive_proof_rejects_expired_bct() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let len = consensus.bee_gestation_blocks + consensus.bee_lifespan_blocks + 3;
		let fixture = fixture(len, None);
		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::BctExpired)));
	}

	#[test]
	fn test_hive_proof_rejects_consecutive_hive_blocks() {
		// parent becomes the 2nd consecutive hive block, max_consecutive = 2
		let mut fixture = fixture(41, None);

		for tag in 0..fixture.consensus.max_consecutive_hive_blocks {
			let parent = fixture.parent();
			let hive_block = block_builder()
				.time(parent.raw.time + 120)
				.parent(parent.hash)
				.nonce(fixture.consensus.hive_nonce_marker)
				.coinbase(10_000 + tag)
				.build();
			fixture.store.insert(hive_block);
		}

		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::TooManyConsecutive)));
	}

	#[test]
	fn test_hive_proof_rejects_before_fork() {
		// parent predates the fork: hive is not enabled yet
		let consensus = ConsensusParams::new(Network::Testnet);
		let key_pair = Random::new(keys::Network::Testnet).generate().unwrap();

		let mut store = MemoryStore::new();
		let mut parent_hash = SHA256D::default();
		for height in 0..42u32 {
			let block = block_builder()
				.time(consensus.pow_fork_time - 1_000_000 + height * 120)
				.parent(parent_hash)
				.coinbase(height)
				.build();
			parent_hash = block.header.hash;
			store.insert(block);
		}

		let fixture = Fixture {
			consensus,
			store,
			key_pair,
			bct_txid: dhash256(b"missing"),
		};

		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::NotEnabled)));
	}

	#[test]
	fn test_hive_proof_rejects_missing_marker() {
		// payload without the OP_RETURN OP_BEE prefix
		let fixture = fixture(41, None);
		let payload = fixture.payload(0, 1, false, &fixture.key_pair);
		let mut raw: Vec<u8> = payload.to_script().to_bytes().take();
		raw[1] = Opcode::OP_RETURN as u8;

		let block = fixture.candidate_with_script(Script::new(raw.into()), None);
		assert_eq!(
			fixture.verify(&block),
			Err(Error::Hive(HiveError::Payload(PayloadError::NoMarker)))
		);
	}

	#[test]
	fn test_hive_proof_rejects_bee_hash_above_target() {
		let fixture = fixture(41, None);
		let block = fixture.candidate(0, 1, false);
		assert_eq!(
			verify_hive_proof(&block, &fixture.store, &LosingHasher, &fixture.consensus),
			Err(Error::Hive(HiveError::BeeHashAboveTarget))
		);
	}

	#[test]
	fn test_hive_proof_rejects_foreign_signature() {
		let fixture = fixture(41, None);
		let stranger = Random::new(keys::Network::Testnet).generate().unwrap();
		let payload = fixture.payload(0, 1, false, &stranger);
		let block = fixture.candidate_with_script(payload.to_script(), None);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::SignatureMismatch)));
	}

	#[test]
	fn test_hive_proof_rejects_bct_in_block() {
		let fixture = fixture(41, None);
		let extra_bct = bct_transaction(&fixture.consensus, &fixture.key_pair, 12_345_678, None);
		let payload = fixture.payload(0, 1, false, &fixture.key_pair);
		let block = fixture.candidate_with_script(payload.to_script(), Some(extra_bct));
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::ContainsBct)));
	}

	#[test]
	fn test_hive_proof_rejects_nonce_beyond_bee_count() {
		// 2 bees bought; nonce 2 names a 3rd bee
		let fixture = fixture(41, None);
		let block = fixture.candidate(2, 1, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::BeeNonceOutOfRange)));
	}

	#[test]
	fn test_hive_proof_rejects_wrong_claimed_height() {
		let fixture = fixture(41, None);
		let block = fixture.candidate(0, 2, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::HeightMismatch)));
	}

	#[test]
	fn test_hive_proof_deep_drill_fallback() {
		// without a UTXO record the validator drills into the claimed block
		let mut fixture = fixture(41, None);
		let bct_txid = fixture.bct_txid;
		fixture.store.forget_transaction(&bct_txid);

		let block = fixture.candidate(0, 1, false);
		assert_eq!(fixture.verify(&block), Ok(()));

		// with a wrong claimed height the drill misses
		let block = fixture.candidate(0, 3, false);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::BctNotFound)));
	}

	#[test]
	fn test_hive_proof_accepts_community_contribution() {
		// the donation output is validated through the UTXO set; the BCT
		// reference stays empty and the in-transaction re-check is skipped
		let consensus = ConsensusParams::new(Network::Testnet);
		let (fee, donation) = matching_donation(&consensus);
		let mut fixture = fixture(41, Some((fee, Some(donation))));

		let block = fixture.candidate(0, 1, true);
		assert_eq!(fixture.verify(&block), Ok(()));

		// the deep drill path reaches the same verdict
		let bct_txid = fixture.bct_txid;
		fixture.store.forget_transaction(&bct_txid);
		let block = fixture.candidate(0, 1, true);
		assert_eq!(fixture.verify(&block), Ok(()));
	}

	#[test]
	fn test_hive_proof_rejects_bad_donation() {
		let consensus = ConsensusParams::new(Network::Testnet);
		let (fee, donation) = matching_donation(&consensus);
		let fixture = fixture(41, Some((fee, Some(donation + 1))));

		let block = fixture.candidate(0, 1, true);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::DonationMismatch)));
	}

	#[test]
	fn test_hive_proof_rejects_contribution_flag_without_donation() {
		// flag set but the BCT has no second output
		let fixture = fixture(41, None);
		let block = fixture.candidate(0, 1, true);
		assert_eq!(fixture.verify(&block), Err(Error::Hive(HiveError::DonationNotFound)));
	}
}
