//! Per-call validation input.

use alloy::primitives::B256;

use crate::{
	models::{EVMReceiptLog, EVMTransaction},
	services::signature::KnownSignatures,
};

/// Inclusive block range searched when logs are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
	pub from_block: u64,
	pub to_block: u64,
}

impl BlockRange {
	pub fn new(from_block: u64, to_block: u64) -> Self {
		Self {
			from_block,
			to_block,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.from_block > self.to_block
	}
}

/// Chain data and signatures supplied for one validation call.
///
/// Where candidates come from:
/// - event steps use `logs` when given, else the logs of the receipt of
///   `transaction_hash`, else logs fetched from the step's contract over
///   `block_range` (or from `anchor_block` to the latest block)
/// - function steps use `transaction` when given, else the transaction
///   fetched by `transaction_hash`
///
/// When `chain_id` is set, rules configured for another chain find nothing.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
	pub logs: Option<Vec<EVMReceiptLog>>,
	pub transaction_hash: Option<B256>,
	pub transaction: Option<EVMTransaction>,
	pub chain_id: Option<u64>,
	pub known_signatures: Option<KnownSignatures>,
	pub block_range: Option<BlockRange>,
	/// Block at which the boost was configured
	pub anchor_block: Option<u64>,
}

impl ValidationContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_logs(mut self, logs: Vec<EVMReceiptLog>) -> Self {
		self.logs = Some(logs);
		self
	}

	pub fn with_transaction_hash(mut self, transaction_hash: B256) -> Self {
		self.transaction_hash = Some(transaction_hash);
		self
	}

	pub fn with_transaction(mut self, transaction: EVMTransaction) -> Self {
		self.transaction = Some(transaction);
		self
	}

	pub fn with_chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = Some(chain_id);
		self
	}

	pub fn with_known_signatures(mut self, known_signatures: KnownSignatures) -> Self {
		self.known_signatures = Some(known_signatures);
		self
	}

	pub fn with_block_range(mut self, from_block: u64, to_block: u64) -> Self {
		self.block_range = Some(BlockRange::new(from_block, to_block));
		self
	}

	pub fn with_anchor_block(mut self, anchor_block: u64) -> Self {
		self.anchor_block = Some(anchor_block);
		self
	}

	/// Whether rules configured for `chain_id` may match in this context.
	pub fn admits_chain(&self, chain_id: u64) -> bool {
		self.chain_id.is_none_or(|context_chain| context_chain == chain_id)
	}
}
