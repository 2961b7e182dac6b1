//! EVM transaction data structures.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use alloy::primitives::{Address, Bytes, B256, U256, U64};

/// Subset of `eth_getTransactionByHash` needed to decode calldata
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct BaseTransaction {
	/// Hash
	pub hash: B256,
	/// Block number. None when pending.
	#[serde(rename = "blockNumber", default)]
	pub block_number: Option<U64>,
	/// Sender
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub from: Option<Address>,
	/// Recipient (None when contract creation)
	#[serde(default)]
	pub to: Option<Address>,
	/// Transferred value
	#[serde(default)]
	pub value: U256,
	/// Input data
	#[serde(default)]
	pub input: Bytes,
	/// Chain id, absent for legacy pre-EIP-155 transactions
	#[serde(rename = "chainId", default, skip_serializing_if = "Option::is_none")]
	pub chain_id: Option<U64>,
}

/// Wrapper around [`BaseTransaction`]
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Transaction(pub BaseTransaction);

impl Transaction {
	/// Get the transaction hash
	pub fn hash(&self) -> &B256 {
		&self.0.hash
	}

	/// Get the transaction recipient address (None for contract creation)
	pub fn to(&self) -> Option<&Address> {
		self.0.to.as_ref()
	}

	/// Get the transaction sender address
	pub fn sender(&self) -> Option<&Address> {
		self.0.from.as_ref()
	}

	/// The 4-byte function selector, if the calldata is long enough to carry one.
	pub fn selector(&self) -> Option<[u8; 4]> {
		self.0
			.input
			.get(..4)
			.and_then(|bytes| <[u8; 4]>::try_from(bytes).ok())
	}
}

impl From<BaseTransaction> for Transaction {
	fn from(tx: BaseTransaction) -> Self {
		Self(tx)
	}
}

impl Deref for Transaction {
	type Target = BaseTransaction;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
