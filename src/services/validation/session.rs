//! Candidate lookup for one validation call.
//!
//! Chain data fetched while validating is cached here by chain and hash, so
//! steps sharing a receipt or a log query trigger a single request. The
//! session is dropped at the end of the call.

use alloy::primitives::{Bytes, B256, U64};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use crate::{
	models::{ActionTarget, EVMReceiptLog, EVMTransaction, EVMTransactionReceipt, SignatureType},
	services::{
		blockchain::{ChainDataProvider, LogQuery, ProviderPool},
		filter::DecodedEntity,
		validation::{
			context::{BlockRange, ValidationContext},
			error::ValidationError,
		},
	},
	utils::logging::error::ErrorMetadata,
};

/// Entities that match the contract and signature of a rule
#[derive(Debug, Clone)]
pub(crate) enum Candidates {
	Logs(Vec<EVMReceiptLog>),
	Calls(Vec<Bytes>),
}

impl Candidates {
	pub fn len(&self) -> usize {
		match self {
			Self::Logs(logs) => logs.len(),
			Self::Calls(calls) => calls.len(),
		}
	}

	/// Candidates in the order they were observed.
	pub fn entities(&self) -> Vec<DecodedEntity<'_>> {
		match self {
			Self::Logs(logs) => logs.iter().map(DecodedEntity::Log).collect(),
			Self::Calls(calls) => calls
				.iter()
				.map(|input| DecodedEntity::Calldata(input.as_ref()))
				.collect(),
		}
	}

	fn none(signature_type: SignatureType) -> Self {
		match signature_type {
			SignatureType::Event => Self::Logs(Vec::new()),
			SignatureType::Func => Self::Calls(Vec::new()),
		}
	}
}

pub(crate) struct ValidationSession<'a, P: ProviderPool> {
	context: &'a ValidationContext,
	providers: &'a P,
	receipts: HashMap<(u64, B256), Option<EVMTransactionReceipt>>,
	transactions: HashMap<(u64, B256), Option<EVMTransaction>>,
	logs: HashMap<(u64, LogQuery), Vec<EVMReceiptLog>>,
	latest_blocks: HashMap<u64, u64>,
}

impl<'a, P: ProviderPool> ValidationSession<'a, P> {
	pub fn new(context: &'a ValidationContext, providers: &'a P) -> Self {
		Self {
			context,
			providers,
			receipts: HashMap::new(),
			transactions: HashMap::new(),
			logs: HashMap::new(),
			latest_blocks: HashMap::new(),
		}
	}

	/// Locates the logs or calls emitted by the rule's contract under its signature.
	///
	/// Removed logs and calldata too short to carry a selector never match.
	pub async fn candidates<T: ActionTarget + ?Sized>(
		&mut self,
		target: &T,
	) -> Result<Candidates, ValidationError> {
		let chain_id = target.chain_id();
		if !self.context.admits_chain(chain_id) {
			debug!(
				chain_id,
				context_chain_id = ?self.context.chain_id,
				"Rule targets another chain"
			);
			return Ok(Candidates::none(target.signature_type()));
		}

		let contract = *target.target_contract();
		let signature = *target.signature();

		match target.signature_type() {
			SignatureType::Event => {
				let logs = self.event_logs(chain_id, target).await?;
				Ok(Candidates::Logs(
					logs.into_iter()
						.filter(|log| {
							!log.is_removed()
								&& log.address == contract
								&& log.event_hash() == Some(&signature)
						})
						.collect(),
				))
			}
			SignatureType::Func => {
				let selector = &signature.as_slice()[..4];
				let calls = self
					.call(chain_id)
					.await?
					.into_iter()
					.filter(|tx| {
						tx.to() == Some(&contract)
							&& tx.selector().is_some_and(|s| s.as_slice() == selector)
					})
					.map(|tx| tx.0.input)
					.collect();
				Ok(Candidates::Calls(calls))
			}
		}
	}

	async fn event_logs<T: ActionTarget + ?Sized>(
		&mut self,
		chain_id: u64,
		target: &T,
	) -> Result<Vec<EVMReceiptLog>, ValidationError> {
		if let Some(logs) = &self.context.logs {
			return Ok(logs.clone());
		}

		if let Some(transaction_hash) = self.context.transaction_hash {
			return Ok(self
				.receipt(chain_id, transaction_hash)
				.await?
				.map(|receipt| receipt.0.logs)
				.unwrap_or_default());
		}

		let range = self.log_range(chain_id).await?;
		if range.is_empty() {
			debug!(chain_id, ?range, "Empty log range");
			return Ok(Vec::new());
		}

		let query = LogQuery::for_event(
			*target.target_contract(),
			*target.signature(),
			range.from_block,
			range.to_block,
		);
		self.fetch_logs(chain_id, query).await
	}

	async fn call(&mut self, chain_id: u64) -> Result<Option<EVMTransaction>, ValidationError> {
		let transaction = match (&self.context.transaction, self.context.transaction_hash) {
			(Some(transaction), _) => Some(transaction.clone()),
			(None, Some(transaction_hash)) => self.transaction(chain_id, transaction_hash).await?,
			(None, None) => {
				return Err(ValidationError::configuration_error(
					"function rules need a transaction or a transaction hash",
					None,
					Some(chain_metadata(chain_id)),
				))
			}
		};

		Ok(transaction.filter(|tx| {
			tx.chain_id
				.is_none_or(|tx_chain| tx_chain == U64::from(chain_id))
		}))
	}

	/// Range searched when logs must be fetched: the context range, else from
	/// the anchor block (or the network lookback) to the latest block.
	async fn log_range(&mut self, chain_id: u64) -> Result<BlockRange, ValidationError> {
		if let Some(range) = self.context.block_range {
			return Ok(range);
		}

		let latest = self.latest_block(chain_id).await?;
		let from_block = match self.context.anchor_block {
			Some(anchor_block) => anchor_block,
			None => latest.saturating_sub(self.providers.log_lookback_blocks(chain_id)),
		};
		Ok(BlockRange::new(from_block, latest))
	}

	async fn provider(&self, chain_id: u64) -> Result<Arc<P::Provider>, ValidationError> {
		self.providers
			.get_provider(chain_id)
			.await
			.map_err(|e| transport_error(chain_id, "no chain data provider available", e))
	}

	async fn latest_block(&mut self, chain_id: u64) -> Result<u64, ValidationError> {
		if let Some(latest) = self.latest_blocks.get(&chain_id) {
			return Ok(*latest);
		}

		let latest = self
			.provider(chain_id)
			.await?
			.get_latest_block_number()
			.await
			.map_err(|e| transport_error(chain_id, "failed to fetch latest block", e))?;
		self.latest_blocks.insert(chain_id, latest);
		Ok(latest)
	}

	async fn receipt(
		&mut self,
		chain_id: u64,
		transaction_hash: B256,
	) -> Result<Option<EVMTransactionReceipt>, ValidationError> {
		let key = (chain_id, transaction_hash);
		if let Some(receipt) = self.receipts.get(&key) {
			return Ok(receipt.clone());
		}

		let receipt = self
			.provider(chain_id)
			.await?
			.get_transaction_receipt(&transaction_hash)
			.await
			.map_err(|e| transport_error(chain_id, "failed to fetch transaction receipt", e))?;
		if receipt.is_none() {
			debug!(chain_id, %transaction_hash, "Receipt not found");
		}
		self.receipts.insert(key, receipt.clone());
		Ok(receipt)
	}

	async fn transaction(
		&mut self,
		chain_id: u64,
		transaction_hash: B256,
	) -> Result<Option<EVMTransaction>, ValidationError> {
		let key = (chain_id, transaction_hash);
		if let Some(transaction) = self.transactions.get(&key) {
			return Ok(transaction.clone());
		}

		let transaction = self
			.provider(chain_id)
			.await?
			.get_transaction(&transaction_hash)
			.await
			.map_err(|e| transport_error(chain_id, "failed to fetch transaction", e))?;
		if transaction.is_none() {
			debug!(chain_id, %transaction_hash, "Transaction not found");
		}
		self.transactions.insert(key, transaction.clone());
		Ok(transaction)
	}

	async fn fetch_logs(
		&mut self,
		chain_id: u64,
		query: LogQuery,
	) -> Result<Vec<EVMReceiptLog>, ValidationError> {
		let key = (chain_id, query);
		if let Some(logs) = self.logs.get(&key) {
			return Ok(logs.clone());
		}

		let logs = self
			.provider(chain_id)
			.await?
			.get_logs(&key.1)
			.await
			.map_err(|e| transport_error(chain_id, "failed to fetch logs", e))?;
		debug!(
			chain_id,
			from_block = key.1.from_block,
			to_block = key.1.to_block,
			count = logs.len(),
			"Fetched logs"
		);
		self.logs.insert(key, logs.clone());
		Ok(logs)
	}
}

fn chain_metadata(chain_id: u64) -> ErrorMetadata {
	ErrorMetadata::from([("chain_id".to_string(), chain_id.to_string())])
}

fn transport_error(chain_id: u64, msg: &str, error: anyhow::Error) -> ValidationError {
	ValidationError::transport_error(msg, Some(error.into()), Some(chain_metadata(chain_id)))
}
