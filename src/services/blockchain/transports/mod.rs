//! JSON-RPC transport used by the chain data clients.

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransportClient;

use serde_json::{json, Value};

/// Sends JSON-RPC envelopes to one node endpoint
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Endpoint requests are sent to
	fn endpoint(&self) -> &str;

	/// Sends `method` with `params` and returns the full response envelope.
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, TransportError>;

	/// Wraps a call in a JSON-RPC 2.0 envelope. Missing params are sent as `[]`.
	fn build_request(&self, method: &str, params: Option<Value>) -> Value {
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.unwrap_or_else(|| json!([])),
		})
	}
}
