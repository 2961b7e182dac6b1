//! EVM receipt and log data structures.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use alloy::{
	primitives::{Address, Bytes, Log as AlloyLog, B256, U256, U64},
	rpc::types::Index,
};

/// Log entry as returned by `eth_getLogs` or inside a receipt
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLog {
	/// Emitting contract
	pub address: Address,
	/// Topics; `topics[0]` is the event hash for non-anonymous events
	pub topics: Vec<B256>,
	/// ABI-encoded non-indexed arguments
	pub data: Bytes,
	/// Block Hash
	#[serde(rename = "blockHash", default)]
	pub block_hash: Option<B256>,
	/// Block Number
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<U64>,
	/// Transaction Hash
	#[serde(rename = "transactionHash", default)]
	pub transaction_hash: Option<B256>,
	/// Transaction Index
	#[serde(rename = "transactionIndex", default)]
	pub transaction_index: Option<Index>,
	/// Log Index in Block
	#[serde(rename = "logIndex", default)]
	pub log_index: Option<U256>,
	/// Set when the log was dropped by a reorg
	#[serde(default)]
	pub removed: Option<bool>,
}

impl BaseLog {
	/// The event hash carried in `topics[0]`, if any.
	pub fn event_hash(&self) -> Option<&B256> {
		self.topics.first()
	}

	/// Whether the log was removed by a chain reorganisation.
	pub fn is_removed(&self) -> bool {
		self.removed.unwrap_or(false)
	}
}

impl From<AlloyLog> for BaseLog {
	fn from(log: AlloyLog) -> Self {
		Self {
			address: log.address,
			topics: log.topics().to_vec(),
			data: log.data.data,
			..Default::default()
		}
	}
}

/// Subset of a transaction receipt needed to validate actions
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseReceipt {
	/// Transaction hash.
	#[serde(rename = "transactionHash")]
	pub transaction_hash: B256,
	/// Number of the block this transaction was included within.
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<U64>,
	/// Sender
	#[serde(default)]
	pub from: Address,
	/// Recipient (None when contract creation)
	#[serde(default)]
	pub to: Option<Address>,
	/// Logs generated within this transaction.
	pub logs: Vec<BaseLog>,
	/// Status: either 1 (success) or 0 (failure).
	#[serde(default)]
	pub status: Option<U64>,
}

/// Wrapper around [`BaseReceipt`]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TransactionReceipt(pub BaseReceipt);

impl TransactionReceipt {
	/// Returns false only when the receipt explicitly reports a reverted transaction.
	pub fn succeeded(&self) -> bool {
		self.0.status.is_none_or(|status| status != U64::ZERO)
	}
}

impl From<BaseReceipt> for TransactionReceipt {
	fn from(receipt: BaseReceipt) -> Self {
		Self(receipt)
	}
}

impl Deref for TransactionReceipt {
	type Target = BaseReceipt;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
