//! Declarative action rules.
//!
//! An action is described by one claimant rule and an ordered list of steps.
//! Both mirror the record stored on-chain when the boost is created, so the
//! numeric encodings of the enums below must not change.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::models::ConfigError;

/// Whether a signature identifies an event log or a function call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SignatureType {
	/// Event log: the signature is the 32-byte topic hash
	Event = 0,
	/// Function call: the signature is the 4-byte selector, right-padded to 32 bytes
	Func = 1,
}

/// Type tag governing how a field is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PrimitiveType {
	Address = 0,
	Uint = 1,
	Bytes = 2,
	String = 3,
	Bool = 4,
}

/// Predicate applied between the extracted field and `filter_data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum FilterType {
	Equal = 0,
	NotEqual = 1,
	GreaterThan = 2,
	LessThan = 3,
	Contains = 4,
}

impl TryFrom<u8> for SignatureType {
	type Error = ConfigError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Event),
			1 => Ok(Self::Func),
			other => Err(ConfigError::parse_error(
				format!("unknown signature type {}", other),
				None,
				None,
			)),
		}
	}
}

impl TryFrom<u8> for PrimitiveType {
	type Error = ConfigError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Address),
			1 => Ok(Self::Uint),
			2 => Ok(Self::Bytes),
			3 => Ok(Self::String),
			4 => Ok(Self::Bool),
			other => Err(ConfigError::parse_error(
				format!("unknown primitive type {}", other),
				None,
				None,
			)),
		}
	}
}

impl TryFrom<u8> for FilterType {
	type Error = ConfigError;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Self::Equal),
			1 => Ok(Self::NotEqual),
			2 => Ok(Self::GreaterThan),
			3 => Ok(Self::LessThan),
			4 => Ok(Self::Contains),
			other => Err(ConfigError::parse_error(
				format!("unknown filter type {}", other),
				None,
				None,
			)),
		}
	}
}

impl FilterType {
	/// Returns true when this predicate is defined for `field_type`.
	///
	/// Ordering only exists for `Uint`; `Contains` only for `Bytes` and `String`.
	pub fn is_defined_for(self, field_type: PrimitiveType) -> bool {
		match self {
			Self::Equal | Self::NotEqual => true,
			Self::GreaterThan | Self::LessThan => field_type == PrimitiveType::Uint,
			Self::Contains => matches!(field_type, PrimitiveType::Bytes | PrimitiveType::String),
		}
	}
}

impl PrimitiveType {
	/// Checks that `filter_data` has the encoding width expected for this type.
	///
	/// - `Address`: 20 bytes, or a 32-byte word with the upper 12 bytes zeroed
	/// - `Uint`: 1 to 32 big-endian bytes
	/// - `Bool`: 1 byte or a 32-byte word, holding 0 or 1
	/// - `Bytes`: any length
	/// - `String`: any length of valid UTF-8
	pub fn accepts_filter_data(self, filter_data: &[u8]) -> bool {
		match self {
			Self::Address => match filter_data.len() {
				20 => true,
				32 => filter_data[..12].iter().all(|b| *b == 0),
				_ => false,
			},
			Self::Uint => (1..=32).contains(&filter_data.len()),
			Self::Bool => match filter_data.len() {
				1 | 32 => {
					let (last, rest) = filter_data.split_last().unwrap_or((&0, &[]));
					rest.iter().all(|b| *b == 0) && *last <= 1
				}
				_ => false,
			},
			Self::Bytes => true,
			Self::String => std::str::from_utf8(filter_data).is_ok(),
		}
	}
}

/// The filter applied to one field of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParameter {
	pub filter_type: FilterType,
	pub field_type: PrimitiveType,
	/// Logical argument index in declaration order
	pub field_index: u8,
	/// Right-hand operand, pre-encoded to the width of `field_type`
	pub filter_data: Bytes,
}

/// One required condition of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStep {
	pub chain_id: u64,
	pub signature: B256,
	pub signature_type: SignatureType,
	pub target_contract: Address,
	pub action_parameter: ActionParameter,
}

/// Rule locating the address credited with the action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionClaimant {
	pub chain_id: u64,
	pub signature: B256,
	pub signature_type: SignatureType,
	pub field_index: u8,
	pub target_contract: Address,
}

/// Complete action configuration of a boost. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventActionPayload {
	pub action_claimant: ActionClaimant,
	pub action_steps: Vec<ActionStep>,
}

/// Common view over the parts of a step or claimant used to locate an entity.
pub trait ActionTarget {
	fn chain_id(&self) -> u64;
	fn signature(&self) -> &B256;
	fn signature_type(&self) -> SignatureType;
	fn target_contract(&self) -> &Address;
	fn field_index(&self) -> usize;
}

impl ActionTarget for ActionStep {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	fn signature(&self) -> &B256 {
		&self.signature
	}

	fn signature_type(&self) -> SignatureType {
		self.signature_type
	}

	fn target_contract(&self) -> &Address {
		&self.target_contract
	}

	fn field_index(&self) -> usize {
		usize::from(self.action_parameter.field_index)
	}
}

impl ActionTarget for ActionClaimant {
	fn chain_id(&self) -> u64 {
		self.chain_id
	}

	fn signature(&self) -> &B256 {
		&self.signature
	}

	fn signature_type(&self) -> SignatureType {
		self.signature_type
	}

	fn target_contract(&self) -> &Address {
		&self.target_contract
	}

	fn field_index(&self) -> usize {
		usize::from(self.field_index)
	}
}
