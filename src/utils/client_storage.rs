use std::{collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

/// Generic client storage keyed by `K`.
///
/// Clients are stored in a thread-safe way using a HashMap and an RwLock.
/// Chain data providers are keyed by chain id.
pub struct ClientStorage<K, T> {
	pub clients: Arc<RwLock<HashMap<K, Arc<T>>>>,
}

impl<K: Eq + Hash, T> ClientStorage<K, T> {
	pub fn new() -> Self {
		Self {
			clients: Arc::new(RwLock::new(HashMap::new())),
		}
	}

	/// Number of cached clients.
	pub async fn len(&self) -> usize {
		self.clients.read().await.len()
	}
}

impl<K: Eq + Hash, T> Default for ClientStorage<K, T> {
	fn default() -> Self {
		Self::new()
	}
}
