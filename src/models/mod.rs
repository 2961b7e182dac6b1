//! Domain models and data structures.
//!
//! - `blockchain`: EVM logs, receipts and transactions as returned by JSON-RPC
//! - `config`: Configuration loading and validation
//! - `core`: Action rules and network configuration

mod blockchain;
mod config;
mod core;

pub use blockchain::evm::{
	EVMBaseReceipt, EVMBaseTransaction, EVMReceiptLog, EVMTransaction, EVMTransactionReceipt,
};

pub use core::{
	ActionClaimant, ActionParameter, ActionStep, ActionTarget, EventActionPayload, FilterType,
	Network, PrimitiveType, RpcUrl, SignatureType, DEFAULT_MAX_LOG_LOOKBACK_BLOCKS,
};

pub use config::{ConfigError, ConfigLoader};
