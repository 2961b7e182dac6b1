//! Property-based tests for action validation.
//! Tests cover step conjunction and determinism over supplied logs.

use std::sync::Arc;

use alloy::{
	core::dyn_abi::DynSolValue,
	primitives::{Address, U256},
};
use boost_action_validator::{
	models::{EVMReceiptLog, EventActionPayload, FilterType, PrimitiveType, SignatureType},
	services::{
		blockchain::OfflineProviders,
		signature::DecodedShape,
		validation::{ActionValidationEngine, ValidationContext},
	},
	utils::tests::{ActionStepBuilder, LogBuilder, PayloadBuilder, ERC20_TRANSFER},
};
use proptest::{prelude::*, test_runner::Config};

use crate::properties::strategies::address_strategy;

const MAX_STEPS: usize = 6;

fn transfer_log(token: Address, from: Address, amount: u64) -> EVMReceiptLog {
	let transfer = DecodedShape::parse(SignatureType::Event, ERC20_TRANSFER).unwrap();
	LogBuilder::new()
		.address(token)
		.event(&transfer)
		.args(vec![
			DynSolValue::Address(from),
			DynSolValue::Address(Address::repeat_byte(0xbb)),
			DynSolValue::Uint(U256::from(amount), 256),
		])
		.build()
}

fn threshold_payload(token: Address, thresholds: &[u64]) -> EventActionPayload {
	PayloadBuilder::new()
		.steps(
			thresholds
				.iter()
				.map(|threshold| {
					ActionStepBuilder::new()
						.event(ERC20_TRANSFER)
						.target_contract(token)
						.filter(
							FilterType::GreaterThan,
							PrimitiveType::Uint,
							2,
							threshold.to_be_bytes().to_vec(),
						)
						.build()
				})
				.collect(),
		)
		.build()
}

fn validate(payload: &EventActionPayload, context: &ValidationContext) -> bool {
	let engine = ActionValidationEngine::new(Arc::new(OfflineProviders));
	tokio::runtime::Builder::new_current_thread()
		.build()
		.unwrap()
		.block_on(engine.validate_action(payload, context))
		.unwrap()
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		cases: 64,
		..Config::default()
	})]

	/// Property: an action holds exactly when every step holds
	#[test]
	fn prop_action_is_conjunction_of_steps(
		token in address_strategy(),
		sender in address_strategy(),
		amount in any::<u64>(),
		thresholds in prop::collection::vec(any::<u64>(), 0..MAX_STEPS),
	) {
		let payload = threshold_payload(token, &thresholds);
		let context = ValidationContext::new().with_logs(vec![transfer_log(token, sender, amount)]);

		prop_assert_eq!(
			validate(&payload, &context),
			thresholds.iter().all(|threshold| amount > *threshold)
		);
	}

	/// Property: repeated validation of the same input gives the same answer
	#[test]
	fn prop_validation_is_deterministic(
		token in address_strategy(),
		sender in address_strategy(),
		amounts in prop::collection::vec(any::<u64>(), 0..4),
		thresholds in prop::collection::vec(any::<u64>(), 1..MAX_STEPS),
	) {
		let payload = threshold_payload(token, &thresholds);
		let logs = amounts
			.iter()
			.map(|amount| transfer_log(token, sender, *amount))
			.collect();
		let context = ValidationContext::new().with_logs(logs);

		prop_assert_eq!(validate(&payload, &context), validate(&payload, &context));
	}

	/// Property: logs from other contracts never satisfy a step
	#[test]
	fn prop_other_contract_is_ignored(
		token in address_strategy(),
		other in address_strategy(),
		sender in address_strategy(),
		amount in any::<u64>(),
	) {
		prop_assume!(token != other);
		let payload = threshold_payload(token, &[0]);
		let context = ValidationContext::new().with_logs(vec![transfer_log(other, sender, amount)]);

		prop_assert!(!validate(&payload, &context));
	}
}
