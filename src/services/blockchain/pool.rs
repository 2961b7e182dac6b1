//! Provider pool for chain data access.
//!
//! The pool maps a chain id to the configured [`Network`] and hands out a
//! cached [`ChainDataProvider`] for it. Providers are created lazily on first
//! use and shared afterwards.

use anyhow::Context;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::{collections::HashMap, sync::Arc};

use crate::{
	models::{Network, DEFAULT_MAX_LOG_LOOKBACK_BLOCKS},
	services::blockchain::{
		client::ChainDataProvider, BlockChainError, EvmClient, HttpTransportClient,
	},
	utils::{client_storage::ClientStorage, logging::error::ErrorMetadata},
};

/// Source of chain data providers keyed by chain id.
#[async_trait]
pub trait ProviderPool: Send + Sync {
	type Provider: ChainDataProvider;

	/// Returns the provider serving `chain_id`.
	async fn get_provider(&self, chain_id: u64) -> Result<Arc<Self::Provider>, anyhow::Error>;

	/// Number of blocks searched backwards when logs must be fetched for `chain_id`.
	fn log_lookback_blocks(&self, _chain_id: u64) -> u64 {
		DEFAULT_MAX_LOG_LOOKBACK_BLOCKS
	}
}

/// Pool of JSON-RPC clients, one per configured network.
pub struct ClientPool {
	networks: HashMap<u64, Network>,
	storage: ClientStorage<u64, EvmClient<HttpTransportClient>>,
}

impl ClientPool {
	/// Creates a pool serving `networks`. A later network with the same chain id
	/// replaces an earlier one.
	pub fn new(networks: impl IntoIterator<Item = Network>) -> Self {
		Self {
			networks: networks
				.into_iter()
				.map(|network| (network.chain_id, network))
				.collect(),
			storage: ClientStorage::new(),
		}
	}

	/// Network configured for `chain_id`, if any.
	pub fn network(&self, chain_id: u64) -> Option<&Network> {
		self.networks.get(&chain_id)
	}

	/// Number of providers created so far.
	pub async fn client_count(&self) -> usize {
		self.storage.len().await
	}

	/// Double-checked get-or-create: a read lock for the cached case, then a
	/// write lock while the client is built.
	async fn get_or_create_client(
		&self,
		network: &Network,
		create_fn: impl Fn(&Network) -> BoxFuture<'static, Result<EvmClient<HttpTransportClient>, anyhow::Error>>,
	) -> Result<Arc<EvmClient<HttpTransportClient>>, anyhow::Error> {
		if let Some(client) = self.storage.clients.read().await.get(&network.chain_id) {
			return Ok(client.clone());
		}

		let mut clients = self.storage.clients.write().await;
		if let Some(client) = clients.get(&network.chain_id) {
			return Ok(client.clone());
		}
		let client = Arc::new(create_fn(network).await?);
		clients.insert(network.chain_id, client.clone());
		Ok(client)
	}
}

#[async_trait]
impl ProviderPool for ClientPool {
	type Provider = EvmClient<HttpTransportClient>;

	async fn get_provider(&self, chain_id: u64) -> Result<Arc<Self::Provider>, anyhow::Error> {
		let network = self.networks.get(&chain_id).ok_or_else(|| {
			BlockChainError::client_pool_error(
				format!("No network configured for chain {}", chain_id),
				None,
				Some(ErrorMetadata::from([(
					"chain_id".to_string(),
					chain_id.to_string(),
				)])),
			)
		})?;

		self.get_or_create_client(network, |n| {
			let network = n.clone();
			Box::pin(async move { EvmClient::new(&network).await })
		})
		.await
		.with_context(|| format!("Failed to get or create client for chain {}", chain_id))
	}

	fn log_lookback_blocks(&self, chain_id: u64) -> u64 {
		self.networks
			.get(&chain_id)
			.map(Network::log_lookback_blocks)
			.unwrap_or(DEFAULT_MAX_LOG_LOOKBACK_BLOCKS)
	}
}

/// Pool with no networks. Every provider request fails, so validation only
/// succeeds when the context carries all the chain data it needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProviders;

#[async_trait]
impl ProviderPool for OfflineProviders {
	type Provider = EvmClient<HttpTransportClient>;

	async fn get_provider(&self, chain_id: u64) -> Result<Arc<Self::Provider>, anyhow::Error> {
		Err(BlockChainError::client_pool_error(
			format!("No chain data provider available for chain {}", chain_id),
			None,
			None,
		)
		.into())
	}
}
