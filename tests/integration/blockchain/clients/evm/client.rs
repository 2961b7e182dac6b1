use alloy::primitives::{address, b256, bytes, B256};
use boost_action_validator::services::blockchain::{
	BlockChainError, ChainDataProvider, EvmClient, HttpTransportClient, LogQuery,
};
use mockito::{Matcher, Server};
use serde_json::json;

use crate::integration::mocks::{
	create_net_version_mock, create_rpc_result_mock, create_test_network_with_urls,
};

const TRANSFER_TOPIC: B256 =
	b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
const TX_HASH: B256 = b256!("1111111111111111111111111111111111111111111111111111111111111111");

async fn connect(server: &mut Server) -> EvmClient<HttpTransportClient> {
	let network = create_test_network_with_urls(8453, vec![&server.url()]);
	EvmClient::new(&network).await.unwrap()
}

#[tokio::test]
async fn test_get_latest_block_number() {
	let mut server = Server::new_async().await;
	let probe = create_net_version_mock(&mut server);
	let block_number = create_rpc_result_mock(&mut server, "eth_blockNumber", json!("0x1b4"));

	let client = connect(&mut server).await;
	assert_eq!(client.get_latest_block_number().await.unwrap(), 436);

	probe.assert();
	block_number.assert();
}

#[tokio::test]
async fn test_get_logs_sends_filter() {
	let mut server = Server::new_async().await;
	let _probe = create_net_version_mock(&mut server);
	let logs = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({
			"method": "eth_getLogs",
			"params": [{
				"fromBlock": "0x64",
				"toBlock": "0xc8",
				"address": "0x00000000000000000000000000000000000000bb",
				"topics": [format!("{:#x}", TRANSFER_TOPIC)],
			}]
		})))
		.with_status(200)
		.with_body(
			json!({
				"jsonrpc": "2.0",
				"id": 1,
				"result": [{
					"address": "0x00000000000000000000000000000000000000bb",
					"topics": [format!("{:#x}", TRANSFER_TOPIC)],
					"data": "0x01",
					"blockNumber": "0x65",
					"transactionHash": format!("{:#x}", TX_HASH),
					"logIndex": "0x0",
					"removed": false
				}]
			})
			.to_string(),
		)
		.create();

	let client = connect(&mut server).await;
	let query = LogQuery::for_event(
		address!("00000000000000000000000000000000000000bb"),
		TRANSFER_TOPIC,
		100,
		200,
	);
	let result = client.get_logs(&query).await.unwrap();

	logs.assert();
	assert_eq!(result.len(), 1);
	assert_eq!(result[0].topics, vec![TRANSFER_TOPIC]);
	assert_eq!(result[0].data, bytes!("01"));
	assert_eq!(result[0].transaction_hash, Some(TX_HASH));
}

#[tokio::test]
async fn test_missing_receipt_is_none() {
	let mut server = Server::new_async().await;
	let _probe = create_net_version_mock(&mut server);
	let receipt = create_rpc_result_mock(&mut server, "eth_getTransactionReceipt", json!(null));

	let client = connect(&mut server).await;
	assert!(client.get_transaction_receipt(&TX_HASH).await.unwrap().is_none());
	receipt.assert();
}

#[tokio::test]
async fn test_get_transaction() {
	let mut server = Server::new_async().await;
	let _probe = create_net_version_mock(&mut server);
	let _transaction = create_rpc_result_mock(
		&mut server,
		"eth_getTransactionByHash",
		json!({
			"hash": format!("{:#x}", TX_HASH),
			"blockNumber": "0x10",
			"from": "0x00000000000000000000000000000000000000aa",
			"to": "0x00000000000000000000000000000000000000bb",
			"value": "0x0",
			"input": "0x40c10f19",
			"chainId": "0x2105"
		}),
	);

	let client = connect(&mut server).await;
	let transaction = client.get_transaction(&TX_HASH).await.unwrap().unwrap();

	assert_eq!(*transaction.hash(), TX_HASH);
	assert_eq!(
		transaction.to(),
		Some(&address!("00000000000000000000000000000000000000bb"))
	);
	assert_eq!(transaction.selector(), Some([0x40, 0xc1, 0x0f, 0x19]));
}

#[tokio::test]
async fn test_rpc_error_is_request_error() {
	let mut server = Server::new_async().await;
	let _probe = create_net_version_mock(&mut server);
	let _error = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_getLogs"})))
		.with_status(200)
		.with_body(
			r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32005,"message":"query returned more than 10000 results"}}"#,
		)
		.create();

	let client = connect(&mut server).await;
	let query = LogQuery::for_event(
		address!("00000000000000000000000000000000000000bb"),
		TRANSFER_TOPIC,
		0,
		1_000_000,
	);
	let err = client.get_logs(&query).await.unwrap_err();

	match err.downcast_ref::<BlockChainError>() {
		Some(BlockChainError::RequestError(ctx)) => {
			assert!(ctx.message.contains("more than 10000 results"));
		}
		other => panic!("expected request error, got {:?}", other),
	}
}

#[tokio::test]
async fn test_http_failure_is_reported() {
	let mut server = Server::new_async().await;
	let _probe = create_net_version_mock(&mut server);
	let _failure = server
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "eth_blockNumber"})))
		.with_status(502)
		.with_body("<html><body>Bad gateway</body></html>")
		.create();

	let client = connect(&mut server).await;
	let err = client.get_latest_block_number().await.unwrap_err();
	assert!(err.to_string().contains("eth_blockNumber"));
}
