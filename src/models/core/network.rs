use serde::{Deserialize, Serialize};

/// Default number of blocks scanned backwards when logs must be fetched and
/// the validation context carries no anchor block.
pub const DEFAULT_MAX_LOG_LOOKBACK_BLOCKS: u64 = 10_000;

/// Configuration for reading chain data from one EVM network.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Network {
	/// Unique identifier for this network
	pub slug: String,

	/// Human-readable name of the network
	pub name: String,

	/// EVM chain id, used to route action steps to this network
	pub chain_id: u64,

	/// List of RPC endpoints with their weights
	pub rpc_urls: Vec<RpcUrl>,

	/// Average block time in milliseconds
	pub block_time_ms: u64,

	/// Maximum number of past blocks searched for logs when no range is given
	#[serde(default)]
	pub max_log_lookback_blocks: Option<u64>,
}

impl Network {
	/// Lookback window used for log fetching on this network.
	pub fn log_lookback_blocks(&self) -> u64 {
		self.max_log_lookback_blocks
			.unwrap_or(DEFAULT_MAX_LOG_LOOKBACK_BLOCKS)
	}
}

/// RPC endpoint configuration with selection weight
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RpcUrl {
	/// Type of RPC endpoint (e.g. "rpc")
	pub type_: String,

	/// URL of the RPC endpoint, or `env:NAME` to read it from the environment
	pub url: String,

	/// Weight for endpoint selection (0-100)
	pub weight: u32,
}
