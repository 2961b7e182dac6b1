//! Engine behaviour against a mocked chain data provider.

use std::sync::Arc;

use alloy::{
	core::dyn_abi::DynSolValue,
	primitives::{address, b256, Address, B256, U256},
};
use boost_action_validator::{
	models::{
		ActionStep, EVMReceiptLog, EVMTransaction, EventActionPayload, FilterType, PrimitiveType,
		SignatureType,
	},
	services::{
		blockchain::LogQuery,
		signature::DecodedShape,
		validation::{ActionValidationEngine, StepOutcome, ValidationContext, ValidationError},
	},
	utils::tests::{
		ActionStepBuilder, ClaimantBuilder, LogBuilder, PayloadBuilder, ReceiptBuilder,
		TransactionBuilder, ERC20_TRANSFER,
	},
};

use crate::integration::mocks::{providers_with, MockChainDataProvider, MockProviders};

const TRANSFER_TOPIC: B256 =
	b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
const TX_HASH: B256 = b256!("1111111111111111111111111111111111111111111111111111111111111111");
const SENDER: Address = address!("00000000000000000000000000000000000000aa");
const TOKEN: Address = address!("00000000000000000000000000000000000000cc");
const MINT: &str = "mint(address to, uint256 amount)";

fn transfer_log(amount: u64) -> EVMReceiptLog {
	let transfer = DecodedShape::parse(SignatureType::Event, ERC20_TRANSFER).unwrap();
	LogBuilder::new()
		.address(TOKEN)
		.event(&transfer)
		.args(vec![
			DynSolValue::Address(SENDER),
			DynSolValue::Address(Address::repeat_byte(0xbb)),
			DynSolValue::Uint(U256::from(amount), 256),
		])
		.transaction_hash(TX_HASH)
		.build()
}

fn transfer_payload(threshold: Vec<u8>) -> EventActionPayload {
	PayloadBuilder::new()
		.claimant(
			ClaimantBuilder::new()
				.event(ERC20_TRANSFER)
				.target_contract(TOKEN),
		)
		.step(
			ActionStepBuilder::new()
				.event(ERC20_TRANSFER)
				.target_contract(TOKEN)
				.filter(FilterType::GreaterThan, PrimitiveType::Uint, 2, threshold)
				.build(),
		)
		.build()
}

fn mint_step() -> ActionStep {
	ActionStepBuilder::new()
		.function("mint(address,uint256)")
		.target_contract(TOKEN)
		.filter(FilterType::Equal, PrimitiveType::Address, 0, SENDER.to_vec())
		.build()
}

fn mint_transaction() -> EVMTransaction {
	let mint = DecodedShape::parse(SignatureType::Func, MINT).unwrap();
	TransactionBuilder::new()
		.hash(TX_HASH)
		.to(TOKEN)
		.call(
			&mint,
			vec![
				DynSolValue::Address(SENDER),
				DynSolValue::Uint(U256::from(10), 256),
			],
		)
		.build()
}

#[tokio::test]
async fn test_logs_are_fetched_from_anchor_block() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_latest_block_number()
		.times(1)
		.returning(|| Ok(150));
	provider
		.expect_get_logs()
		.withf(|query: &LogQuery| {
			query.address == TOKEN
				&& query.topics == vec![Some(TRANSFER_TOPIC)]
				&& query.from_block == 100
				&& query.to_block == 150
		})
		.times(1)
		.returning(|_| Ok(vec![transfer_log(500)]));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_anchor_block(100);

	assert!(engine
		.validate_action(&transfer_payload(vec![0x64]), &context)
		.await
		.unwrap());
}

#[tokio::test]
async fn test_logs_are_fetched_over_lookback_window() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_latest_block_number()
		.returning(|| Ok(20_000));
	provider
		.expect_get_logs()
		.withf(|query: &LogQuery| query.from_block == 15_000 && query.to_block == 20_000)
		.times(1)
		.returning(|_| Ok(vec![transfer_log(50)]));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));

	assert!(!engine
		.validate_action(&transfer_payload(vec![0x64]), &ValidationContext::new())
		.await
		.unwrap());
}

#[tokio::test]
async fn test_block_range_skips_latest_block_lookup() {
	let mut provider = MockChainDataProvider::new();
	provider.expect_get_latest_block_number().times(0);
	provider
		.expect_get_logs()
		.withf(|query: &LogQuery| query.from_block == 10 && query.to_block == 20)
		.times(1)
		.returning(|_| Ok(vec![transfer_log(500)]));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_block_range(10, 20);

	assert!(engine
		.validate_action(&transfer_payload(vec![0x64]), &context)
		.await
		.unwrap());
}

#[tokio::test]
async fn test_receipt_is_fetched_once_per_call() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_transaction_receipt()
		.withf(|hash: &B256| *hash == TX_HASH)
		.times(1)
		.returning(|_| {
			Ok(Some(
				ReceiptBuilder::new()
					.transaction_hash(TX_HASH)
					.logs(vec![transfer_log(500)])
					.build(),
			))
		});

	let payload = PayloadBuilder::new()
		.steps(vec![
			ActionStepBuilder::new()
				.event(ERC20_TRANSFER)
				.target_contract(TOKEN)
				.build(),
			ActionStepBuilder::new()
				.event(ERC20_TRANSFER)
				.target_contract(TOKEN)
				.filter(FilterType::Equal, PrimitiveType::Address, 0, SENDER.to_vec())
				.build(),
		])
		.build();

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_transaction_hash(TX_HASH);

	assert!(engine.validate_action(&payload, &context).await.unwrap());
}

#[tokio::test]
async fn test_missing_receipt_is_unsatisfied() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_transaction_receipt()
		.returning(|_| Ok(None));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_transaction_hash(TX_HASH);

	assert!(!engine
		.validate_action(&transfer_payload(vec![0x64]), &context)
		.await
		.unwrap());
}

#[tokio::test]
async fn test_log_fetch_failure_is_transport_error() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_latest_block_number()
		.returning(|| Ok(150));
	provider
		.expect_get_logs()
		.returning(|_| Err(anyhow::anyhow!("query returned more than 10000 results")));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));

	let err = engine
		.validate_action(&transfer_payload(vec![0x64]), &ValidationContext::new())
		.await
		.unwrap_err();
	assert!(matches!(err, ValidationError::TransportError(_)));
}

#[tokio::test]
async fn test_unsatisfied_step_stops_evaluation() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_transaction_receipt()
		.returning(|_| Ok(Some(ReceiptBuilder::new().transaction_hash(TX_HASH).build())));
	provider.expect_get_transaction().times(0);

	let payload = PayloadBuilder::new()
		.steps(vec![
			transfer_payload(vec![0x64]).action_steps[0].clone(),
			mint_step(),
		])
		.build();

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_transaction_hash(TX_HASH);

	assert!(!engine.validate_action(&payload, &context).await.unwrap());
}

#[tokio::test]
async fn test_other_chain_makes_no_requests() {
	// No expectations: any provider lookup panics.
	let engine = ActionValidationEngine::new(Arc::new(MockProviders::new()));
	let context = ValidationContext::new()
		.with_chain_id(8453)
		.with_transaction_hash(TX_HASH);

	assert!(!engine
		.validate_action(&transfer_payload(vec![0x64]), &context)
		.await
		.unwrap());
}

#[tokio::test]
async fn test_function_step_reads_fetched_transaction() {
	let mut provider = MockChainDataProvider::new();
	provider
		.expect_get_transaction()
		.withf(|hash: &B256| *hash == TX_HASH)
		.times(1)
		.returning(|_| Ok(Some(mint_transaction())));

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_transaction_hash(TX_HASH);

	let outcome = engine.validate_step(&mint_step(), &context).await.unwrap();
	assert_eq!(outcome, StepOutcome::Satisfied);
}

#[tokio::test]
async fn test_claimant_from_fetched_receipt() {
	let mut provider = MockChainDataProvider::new();
	provider.expect_get_transaction_receipt().returning(|_| {
		Ok(Some(
			ReceiptBuilder::new()
				.transaction_hash(TX_HASH)
				.logs(vec![transfer_log(500)])
				.build(),
		))
	});

	let engine = ActionValidationEngine::new(Arc::new(providers_with(provider, 5_000)));
	let context = ValidationContext::new().with_transaction_hash(TX_HASH);

	let claimant = engine
		.resolve_claimant(&transfer_payload(vec![0x64]), &context)
		.await
		.unwrap();
	assert_eq!(claimant, SENDER);
}
