//! Core domain models: action rules and network configuration.

mod action;
mod network;

pub use action::{
	ActionClaimant, ActionParameter, ActionStep, ActionTarget, EventActionPayload, FilterType,
	PrimitiveType, SignatureType,
};
pub use network::{Network, RpcUrl, DEFAULT_MAX_LOG_LOOKBACK_BLOCKS};
