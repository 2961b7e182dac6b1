//! HTTP transport implementation for blockchain interactions.
//!
//! Sends JSON-RPC requests to a single endpoint chosen at construction:
//! the highest-weight URL that answers a test request. Requests are not
//! retried; a failure is returned to the caller as is.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::{
	models::Network,
	services::blockchain::{
		transports::{BlockchainTransport, TransportError},
		BlockChainError,
	},
	utils::logging::error::ErrorMetadata,
};

/// Basic HTTP transport client for blockchain interactions
///
/// The client is cheap to clone and can be shared across tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// HTTP client for making requests
	pub client: reqwest::Client,
	/// Endpoint all requests are sent to
	url: String,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client
	///
	/// Tries the `rpc` endpoints of `network` in order of decreasing weight
	/// and keeps the first that answers `test_connection_payload` (default
	/// `net_version`) with a success status.
	pub async fn new(
		network: &Network,
		test_connection_payload: Option<String>,
	) -> Result<Self, anyhow::Error> {
		let mut rpc_urls: Vec<_> = network
			.rpc_urls
			.iter()
			.filter(|rpc_url| rpc_url.type_ == "rpc" && rpc_url.weight > 0)
			.collect();

		rpc_urls.sort_by(|a, b| b.weight.cmp(&a.weight));

		let client = reqwest::ClientBuilder::new()
			.pool_idle_timeout(Duration::from_secs(90))
			.pool_max_idle_per_host(32)
			.timeout(Duration::from_secs(30))
			.connect_timeout(Duration::from_secs(20))
			.build()
			.context("Failed to create base HTTP client")?;

		let test_request = match &test_connection_payload {
			Some(test_payload) => serde_json::from_str(test_payload)
				.context("Failed to parse test payload as JSON")?,
			None => json!({
				"jsonrpc": "2.0",
				"id": 1,
				"method": "net_version",
				"params": []
			}),
		};

		for rpc_url in rpc_urls.iter() {
			let url = match Url::parse(&rpc_url.url) {
				Ok(url) => url,
				Err(_) => continue,
			};

			match client.post(url.clone()).json(&test_request).send().await {
				Ok(response) if response.status().is_success() => {
					tracing::debug!(network = %network.slug, url = %url, "Connected to RPC endpoint");
					return Ok(Self {
						client,
						url: url.as_str().trim_end_matches('/').to_string(),
					});
				}
				Ok(response) => {
					tracing::warn!(
						url = %url,
						status = %response.status(),
						"RPC endpoint rejected test request"
					);
				}
				Err(e) => {
					tracing::warn!(url = %url, error = %e, "RPC endpoint unreachable");
				}
			}
		}

		Err(BlockChainError::connection_error(
			"All RPC URLs failed to connect",
			None,
			Some(ErrorMetadata::from([(
				"network".to_string(),
				network.slug.clone(),
			)])),
		)
		.into())
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn endpoint(&self) -> &str {
		&self.url
	}

	/// Posts a JSON-RPC request to the endpoint.
	///
	/// Non-success HTTP statuses become [`TransportError::Http`]; the JSON-RPC
	/// `error` member is left for the caller to inspect.
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, TransportError> {
		let request_body = self.build_request(method, params);
		let metadata = || {
			Some(ErrorMetadata::from([
				("method".to_string(), method.to_string()),
				("url".to_string(), self.url.clone()),
			]))
		};

		let response = self
			.client
			.post(&self.url)
			.json(&request_body)
			.send()
			.await
			.map_err(|e| {
				TransportError::unreachable(
					format!("{} request not delivered", method),
					Some(Box::new(e)),
					metadata(),
				)
			})?;

		let status = response.status();
		if !status.is_success() {
			let error_body = response.text().await.unwrap_or_default();
			return Err(TransportError::http(
				status,
				self.url.clone(),
				error_body,
				metadata(),
			));
		}

		response.json().await.map_err(|e| {
			TransportError::malformed_response(
				format!("{} response is not valid JSON", method),
				Some(Box::new(e)),
				metadata(),
			)
		})
	}
}
