//! Test helper utilities for Network configuration
//!
//! - `NetworkBuilder`: Builder for creating test Network instances

use crate::models::{Network, RpcUrl};

/// Builder for creating test Network instances
pub struct NetworkBuilder {
	name: String,
	slug: String,
	chain_id: u64,
	rpc_urls: Vec<RpcUrl>,
	block_time_ms: u64,
	max_log_lookback_blocks: Option<u64>,
}

impl Default for NetworkBuilder {
	fn default() -> Self {
		Self {
			name: "Test Network".to_string(),
			slug: "test_network".to_string(),
			chain_id: 1,
			rpc_urls: vec![RpcUrl {
				type_: "rpc".to_string(),
				url: "https://test.network".to_string(),
				weight: 100,
			}],
			block_time_ms: 1000,
			max_log_lookback_blocks: None,
		}
	}
}

impl NetworkBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn name(mut self, name: &str) -> Self {
		self.name = name.to_string();
		self
	}

	pub fn slug(mut self, slug: &str) -> Self {
		self.slug = slug.to_string();
		self
	}

	pub fn chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = chain_id;
		self
	}

	/// Replaces the RPC URLs with a single endpoint of weight 100.
	pub fn rpc_url(mut self, url: &str) -> Self {
		self.rpc_urls = vec![RpcUrl {
			type_: "rpc".to_string(),
			url: url.to_string(),
			weight: 100,
		}];
		self
	}

	pub fn add_rpc_url(mut self, url: &str, type_: &str, weight: u32) -> Self {
		self.rpc_urls.push(RpcUrl {
			type_: type_.to_string(),
			url: url.to_string(),
			weight,
		});
		self
	}

	pub fn clear_rpc_urls(mut self) -> Self {
		self.rpc_urls.clear();
		self
	}

	pub fn block_time_ms(mut self, block_time: u64) -> Self {
		self.block_time_ms = block_time;
		self
	}

	pub fn max_log_lookback_blocks(mut self, blocks: u64) -> Self {
		self.max_log_lookback_blocks = Some(blocks);
		self
	}

	pub fn build(self) -> Network {
		Network {
			name: self.name,
			slug: self.slug,
			chain_id: self.chain_id,
			rpc_urls: self.rpc_urls,
			block_time_ms: self.block_time_ms,
			max_log_lookback_blocks: self.max_log_lookback_blocks,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_network() {
		let network = NetworkBuilder::new().build();

		assert_eq!(network.name, "Test Network");
		assert_eq!(network.slug, "test_network");
		assert_eq!(network.chain_id, 1);
		assert_eq!(network.rpc_urls.len(), 1);
		assert_eq!(network.rpc_urls[0].url, "https://test.network");
		assert_eq!(network.log_lookback_blocks(), 10_000);
	}

	#[test]
	fn test_rpc_url_management() {
		let network = NetworkBuilder::new()
			.clear_rpc_urls()
			.add_rpc_url("https://rpc1.example.com", "rpc", 50)
			.add_rpc_url("https://rpc2.example.com", "rpc", 100)
			.build();

		assert_eq!(network.rpc_urls.len(), 2);
		assert_eq!(network.rpc_urls[1].weight, 100);
	}

	#[test]
	fn test_lookback_override() {
		let network = NetworkBuilder::new().max_log_lookback_blocks(50).build();
		assert_eq!(network.log_lookback_blocks(), 50);
	}
}
