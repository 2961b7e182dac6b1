use std::sync::Arc;

use boost_action_validator::services::blockchain::{
	BlockChainError, ChainDataProvider, ClientPool, ProviderPool,
};
use mockito::Server;
use serde_json::json;

use crate::integration::mocks::{
	create_net_version_mock, create_rpc_result_mock, create_test_network_with_urls,
};

#[tokio::test]
async fn test_provider_is_created_once_per_chain() {
	let mut server = Server::new_async().await;
	let probe = create_net_version_mock(&mut server);
	let _block = create_rpc_result_mock(&mut server, "eth_blockNumber", json!("0x10"));

	let pool = ClientPool::new(vec![create_test_network_with_urls(8453, vec![&server.url()])]);

	let first = pool.get_provider(8453).await.unwrap();
	let second = pool.get_provider(8453).await.unwrap();

	assert!(Arc::ptr_eq(&first, &second));
	assert_eq!(pool.client_count().await, 1);
	assert_eq!(first.get_latest_block_number().await.unwrap(), 16);
	probe.assert();
}

#[tokio::test]
async fn test_unknown_chain_is_rejected() {
	let pool = ClientPool::new(vec![]);

	let err = pool.get_provider(1).await.unwrap_err();
	assert!(matches!(
		err.downcast_ref::<BlockChainError>(),
		Some(BlockChainError::ClientPoolError(_))
	));
}

#[tokio::test]
async fn test_unreachable_network_is_not_cached() {
	let pool = ClientPool::new(vec![create_test_network_with_urls(
		10,
		vec!["http://127.0.0.1:1"],
	)]);

	assert!(pool.get_provider(10).await.is_err());
	assert_eq!(pool.client_count().await, 0);
}
