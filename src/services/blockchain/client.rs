//! Chain data provider interface.
//!
//! The validation engine only needs a handful of read operations from a
//! chain. Everything else about the transport stays behind this trait.

use alloy::primitives::{Address, B256};
use async_trait::async_trait;

use crate::models::{EVMReceiptLog, EVMTransaction, EVMTransactionReceipt};

/// Filter for an `eth_getLogs` request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogQuery {
	/// Emitting contract
	pub address: Address,
	/// Topic filters by position; `None` matches any topic
	pub topics: Vec<Option<B256>>,
	pub from_block: u64,
	pub to_block: u64,
}

impl LogQuery {
	/// Query for logs of one event emitted by `address` in a block range.
	pub fn for_event(address: Address, topic0: B256, from_block: u64, to_block: u64) -> Self {
		Self {
			address,
			topics: vec![Some(topic0)],
			from_block,
			to_block,
		}
	}
}

/// Read access to one chain
#[async_trait]
pub trait ChainDataProvider: Send + Sync {
	/// Retrieves the latest block number from the blockchain
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error>;

	/// Retrieves the logs matching `query`
	async fn get_logs(&self, query: &LogQuery) -> Result<Vec<EVMReceiptLog>, anyhow::Error>;

	/// Retrieves a transaction receipt, `None` when the node does not know the hash
	async fn get_transaction_receipt(
		&self,
		transaction_hash: &B256,
	) -> Result<Option<EVMTransactionReceipt>, anyhow::Error>;

	/// Retrieves a transaction with its calldata, `None` when unknown
	async fn get_transaction(
		&self,
		transaction_hash: &B256,
	) -> Result<Option<EVMTransaction>, anyhow::Error>;
}
