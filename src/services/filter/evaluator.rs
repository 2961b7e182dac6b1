//! Type-aware comparison of an extracted value against a filter operand.
//!
//! Semantics are kept identical to the on-chain validator that enforces the
//! same rules at claim time:
//! - `ADDRESS`: case-insensitive hex equality
//! - `UINT`: 256-bit unsigned, strict ordering
//! - `BYTES`: byte equality, contiguous subsequence for `CONTAINS`
//! - `STRING`: exact equality, substring for `CONTAINS`
//! - `BOOL`: equality

use alloy::{
	core::dyn_abi::DynSolValue,
	primitives::{Address, U256},
};

use crate::{
	models::{FilterType, PrimitiveType},
	services::filter::{
		helpers::{are_same_address, format_token_value, h160_to_string},
		FilterError,
	},
	utils::logging::error::ErrorMetadata,
};

/// Evaluates filters over decoded values
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEvaluator;

impl FilterEvaluator {
	pub fn new() -> Self {
		Self
	}

	/// Returns whether `raw` satisfies `filter_type` against `filter_data`.
	///
	/// Filters undefined for `field_type`, malformed operands and values that
	/// are not of `field_type` are configuration errors, never `false`.
	pub fn evaluate(
		&self,
		raw: &DynSolValue,
		field_type: PrimitiveType,
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		if !filter_type.is_defined_for(field_type) {
			return Err(FilterError::unsupported_filter(
				format!(
					"filter {:?} is not defined for field type {:?}",
					filter_type, field_type
				),
				None,
				None,
			));
		}

		if !field_type.accepts_filter_data(filter_data) {
			return Err(FilterError::invalid_filter_data(
				format!(
					"filter data of {} bytes is not a valid {:?} operand",
					filter_data.len(),
					field_type
				),
				None,
				Some(ErrorMetadata::from([(
					"filter_data".to_string(),
					format!("0x{}", hex::encode(filter_data)),
				)])),
			));
		}

		match (field_type, raw) {
			(PrimitiveType::Address, DynSolValue::Address(address)) => {
				self.compare_address(address, filter_type, filter_data)
			}
			(PrimitiveType::Uint, DynSolValue::Uint(value, _)) => {
				self.compare_u256(value, filter_type, filter_data)
			}
			(PrimitiveType::Bytes, DynSolValue::Bytes(bytes)) => {
				self.compare_bytes(bytes, filter_type, filter_data)
			}
			(PrimitiveType::Bytes, DynSolValue::FixedBytes(word, size)) => {
				self.compare_bytes(&word[..*size], filter_type, filter_data)
			}
			(PrimitiveType::String, DynSolValue::String(value)) => {
				self.compare_string(value, filter_type, filter_data)
			}
			(PrimitiveType::Bool, DynSolValue::Bool(value)) => {
				self.compare_boolean(*value, filter_type, filter_data)
			}
			_ => Err(FilterError::type_mismatch(
				format!(
					"value {} cannot be compared as {:?}",
					format_token_value(raw),
					field_type
				),
				None,
				None,
			)),
		}
	}

	/// Compares addresses as lowercase hex. The operand is the last 20 bytes
	/// of `filter_data`.
	pub fn compare_address(
		&self,
		left: &Address,
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		let Some(offset) = filter_data.len().checked_sub(20) else {
			return Err(FilterError::invalid_filter_data(
				format!("{} bytes cannot hold an address", filter_data.len()),
				None,
				None,
			));
		};
		let right = Address::from_slice(&filter_data[offset..]);
		let (left, right) = (h160_to_string(*left), h160_to_string(right));

		tracing::debug!("Comparing addresses: left: {}, right: {}", left, right);

		match filter_type {
			FilterType::Equal => Ok(are_same_address(&left, &right)),
			FilterType::NotEqual => Ok(!are_same_address(&left, &right)),
			_ => Err(unsupported(filter_type, PrimitiveType::Address)),
		}
	}

	/// Compares unsigned integers. The operand is big-endian, up to 32 bytes.
	pub fn compare_u256(
		&self,
		left: &U256,
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		let right = U256::try_from_be_slice(filter_data).ok_or_else(|| {
			FilterError::invalid_filter_data(
				format!("{} bytes do not fit in a uint256", filter_data.len()),
				None,
				None,
			)
		})?;

		tracing::debug!(
			"Comparing U256: left: {}, op: {:?}, right: {}",
			left,
			filter_type,
			right
		);

		match filter_type {
			FilterType::Equal => Ok(*left == right),
			FilterType::NotEqual => Ok(*left != right),
			FilterType::GreaterThan => Ok(*left > right),
			FilterType::LessThan => Ok(*left < right),
			FilterType::Contains => Err(unsupported(filter_type, PrimitiveType::Uint)),
		}
	}

	/// Compares raw bytes. `CONTAINS` tests for a contiguous subsequence.
	pub fn compare_bytes(
		&self,
		left: &[u8],
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		tracing::debug!(
			"Comparing bytes: left: 0x{}, op: {:?}, right: 0x{}",
			hex::encode(left),
			filter_type,
			hex::encode(filter_data)
		);

		match filter_type {
			FilterType::Equal => Ok(left == filter_data),
			FilterType::NotEqual => Ok(left != filter_data),
			FilterType::Contains => Ok(contains_subsequence(left, filter_data)),
			_ => Err(unsupported(filter_type, PrimitiveType::Bytes)),
		}
	}

	/// Compares UTF-8 text exactly. Case is significant.
	pub fn compare_string(
		&self,
		left: &str,
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		let right = std::str::from_utf8(filter_data).map_err(|e| {
			FilterError::invalid_filter_data("filter data is not valid UTF-8", Some(Box::new(e)), None)
		})?;

		tracing::debug!(
			"Comparing strings: left: {}, operator: {:?}, right: {}",
			left,
			filter_type,
			right,
		);

		match filter_type {
			FilterType::Equal => Ok(left == right),
			FilterType::NotEqual => Ok(left != right),
			FilterType::Contains => Ok(left.contains(right)),
			_ => Err(unsupported(filter_type, PrimitiveType::String)),
		}
	}

	/// Compares booleans. The operand is the last byte of `filter_data`.
	pub fn compare_boolean(
		&self,
		left: bool,
		filter_type: FilterType,
		filter_data: &[u8],
	) -> Result<bool, FilterError> {
		let right = filter_data.last().is_some_and(|b| *b != 0);
		match filter_type {
			FilterType::Equal => Ok(left == right),
			FilterType::NotEqual => Ok(left != right),
			_ => Err(unsupported(filter_type, PrimitiveType::Bool)),
		}
	}
}

/// Evaluates a single filter with the default evaluator.
pub fn evaluate(
	raw: &DynSolValue,
	field_type: PrimitiveType,
	filter_type: FilterType,
	filter_data: &[u8],
) -> Result<bool, FilterError> {
	FilterEvaluator::new().evaluate(raw, field_type, filter_type, filter_data)
}

fn unsupported(filter_type: FilterType, field_type: PrimitiveType) -> FilterError {
	FilterError::unsupported_filter(
		format!(
			"filter {:?} is not supported for {:?}",
			filter_type, field_type
		),
		None,
		None,
	)
}

fn contains_subsequence(haystack: &[u8], needle: &[u8]) -> bool {
	needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}
