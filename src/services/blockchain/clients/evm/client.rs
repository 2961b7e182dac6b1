//! EVM-compatible blockchain client implementation.
//!
//! Implements [`ChainDataProvider`] over JSON-RPC: `eth_blockNumber`,
//! `eth_getLogs`, `eth_getTransactionReceipt` and `eth_getTransactionByHash`.

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::instrument;

use alloy::primitives::{B256, U64};

use crate::{
	models::{EVMReceiptLog, EVMTransaction, EVMTransactionReceipt, Network},
	services::blockchain::{
		client::{ChainDataProvider, LogQuery},
		transports::{BlockchainTransport, HttpTransportClient},
		BlockChainError,
	},
	utils::logging::error::ErrorMetadata,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
#[derive(Clone, Debug)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	http_client: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(http_client: T) -> Self {
		Self { http_client }
	}
}

impl EvmClient<HttpTransportClient> {
	/// Creates a new EVM client connected to the best endpoint of `network`
	pub async fn new(network: &Network) -> Result<Self, anyhow::Error> {
		let client = HttpTransportClient::new(network, None).await?;
		Ok(Self::new_with_transport(client))
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> EvmClient<T> {
	/// Sends a request and returns its `result` member.
	///
	/// A JSON-RPC `error` member is reported as [`BlockChainError::RequestError`].
	async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, anyhow::Error> {
		let mut response = self
			.http_client
			.send_raw_request(method, params)
			.await
			.with_context(|| format!("Failed to call {}", method))?;

		if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
			let message = error
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("unknown error")
				.to_string();
			return Err(BlockChainError::request_error(
				format!("{} failed: {}", method, message),
				None,
				Some(ErrorMetadata::from([
					("method".to_string(), method.to_string()),
					("rpc_error".to_string(), error.to_string()),
				])),
			)
			.into());
		}

		response.get_mut("result").map(Value::take).ok_or_else(|| {
			BlockChainError::unexpected_response(
				format!("{} response has no result", method),
				None,
				Some(method_metadata(method)),
			)
			.into()
		})
	}

	/// Like [`request`](Self::request) but maps a `null` result to `None`.
	async fn request_optional<R: DeserializeOwned>(
		&self,
		method: &str,
		params: Value,
	) -> Result<Option<R>, anyhow::Error> {
		let result = self.request(method, Some(params)).await?;
		if result.is_null() {
			return Ok(None);
		}
		parse_result(method, result).map(Some)
	}
}

fn method_metadata(method: &str) -> ErrorMetadata {
	ErrorMetadata::from([("method".to_string(), method.to_string())])
}

fn parse_result<R: DeserializeOwned>(method: &str, result: Value) -> Result<R, anyhow::Error> {
	serde_json::from_value(result).map_err(|e| {
		BlockChainError::unexpected_response(
			format!("{} result has an unexpected shape", method),
			Some(Box::new(e)),
			Some(method_metadata(method)),
		)
		.into()
	})
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> ChainDataProvider for EvmClient<T> {
	#[instrument(skip(self))]
	async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error> {
		let result = self.request("eth_blockNumber", None).await?;
		let block_number: U64 = parse_result("eth_blockNumber", result)?;
		Ok(block_number.to::<u64>())
	}

	#[instrument(skip(self), fields(address = %query.address, from_block = query.from_block, to_block = query.to_block))]
	async fn get_logs(&self, query: &LogQuery) -> Result<Vec<EVMReceiptLog>, anyhow::Error> {
		let params = json!([{
			"fromBlock": format!("0x{:x}", query.from_block),
			"toBlock": format!("0x{:x}", query.to_block),
			"address": format!("{:#x}", query.address),
			"topics": query.topics,
		}]);

		let logs = self.request("eth_getLogs", Some(params)).await?;
		parse_result("eth_getLogs", logs)
	}

	#[instrument(skip(self))]
	async fn get_transaction_receipt(
		&self,
		transaction_hash: &B256,
	) -> Result<Option<EVMTransactionReceipt>, anyhow::Error> {
		self.request_optional("eth_getTransactionReceipt", json!([transaction_hash]))
			.await
	}

	#[instrument(skip(self))]
	async fn get_transaction(
		&self,
		transaction_hash: &B256,
	) -> Result<Option<EVMTransaction>, anyhow::Error> {
		self.request_optional("eth_getTransactionByHash", json!([transaction_hash]))
			.await
	}
}
