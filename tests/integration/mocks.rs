//! Mock implementations for testing purposes.
//!
//! - [`MockChainDataProvider`] - Mock chain data provider
//! - [`MockProviders`] - Mock provider pool
//! - Helpers creating networks and JSON-RPC mock servers
//!
//! The mocks are implemented using the `mockall` crate.

use std::sync::Arc;

use alloy::primitives::B256;
use async_trait::async_trait;
use boost_action_validator::{
	models::{EVMReceiptLog, EVMTransaction, EVMTransactionReceipt, Network},
	services::blockchain::{ChainDataProvider, LogQuery, ProviderPool},
	utils::tests::NetworkBuilder,
};
use mockall::mock;
use mockito::{Matcher, Mock, Server};
use serde_json::{json, Value};

mock! {
	/// Mock implementation of the chain data provider.
	///
	/// Simulates node responses without network calls.
	pub ChainDataProvider {}

	#[async_trait]
	impl ChainDataProvider for ChainDataProvider {
		async fn get_latest_block_number(&self) -> Result<u64, anyhow::Error>;
		async fn get_logs(&self, query: &LogQuery) -> Result<Vec<EVMReceiptLog>, anyhow::Error>;
		async fn get_transaction_receipt(
			&self,
			transaction_hash: &B256,
		) -> Result<Option<EVMTransactionReceipt>, anyhow::Error>;
		async fn get_transaction(
			&self,
			transaction_hash: &B256,
		) -> Result<Option<EVMTransaction>, anyhow::Error>;
	}
}

mock! {
	pub Providers {}

	#[async_trait]
	impl ProviderPool for Providers {
		type Provider = MockChainDataProvider;
		async fn get_provider(&self, chain_id: u64) -> Result<Arc<MockChainDataProvider>, anyhow::Error>;
		fn log_lookback_blocks(&self, chain_id: u64) -> u64;
	}
}

/// Pool serving `provider` for every chain with a lookback of `lookback` blocks.
pub fn providers_with(provider: MockChainDataProvider, lookback: u64) -> MockProviders {
	let provider = Arc::new(provider);
	let mut providers = MockProviders::new();
	providers
		.expect_get_provider()
		.returning(move |_| Ok(provider.clone()));
	providers
		.expect_log_lookback_blocks()
		.returning(move |_| lookback);
	providers
}

pub fn create_test_network_with_urls(chain_id: u64, urls: Vec<&str>) -> Network {
	urls.iter()
		.fold(
			NetworkBuilder::new().chain_id(chain_id).clear_rpc_urls(),
			|builder, url| builder.add_rpc_url(url, "rpc", 100),
		)
		.build()
}

/// Answers the `net_version` probe sent when a transport is created.
pub fn create_net_version_mock(server: &mut Server) -> Mock {
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "net_version"})))
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(r#"{"jsonrpc":"2.0","id":1,"result":"1"}"#)
		.create()
}

/// Answers `method` with `result`.
pub fn create_rpc_result_mock(server: &mut Server, method: &str, result: Value) -> Mock {
	server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": method})))
		.with_header("content-type", "application/json")
		.with_status(200)
		.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
		.create()
}
