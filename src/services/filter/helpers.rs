//! Helpers for comparing decoded EVM values.

use alloy::{
	core::dyn_abi::{DynSolType, DynSolValue},
	primitives::Address,
};

use crate::models::PrimitiveType;

/// Converts an Address to a lowercase `0x`-prefixed hex string.
pub fn h160_to_string(address: Address) -> String {
	format!("0x{}", hex::encode(address.as_slice()))
}

/// Checks if two addresses are equal, ignoring case and `0x` prefix.
pub fn are_same_address(address1: &str, address2: &str) -> bool {
	normalize_address(address1) == normalize_address(address2)
}

/// Normalizes an address string by removing the `0x` prefix, spaces, and
/// converting to lowercase.
pub fn normalize_address(address: &str) -> String {
	address
		.strip_prefix("0x")
		.or_else(|| address.strip_prefix("0X"))
		.unwrap_or(address)
		.replace(" ", "")
		.to_lowercase()
}

/// Whether values of `abi_type` can be compared as `field_type`.
///
/// Fixed-size `bytesN` compare as `BYTES`. Signed integers, arrays and tuples
/// have no primitive counterpart.
pub fn primitive_accepts(field_type: PrimitiveType, abi_type: &DynSolType) -> bool {
	match field_type {
		PrimitiveType::Address => matches!(abi_type, DynSolType::Address),
		PrimitiveType::Uint => matches!(abi_type, DynSolType::Uint(_)),
		PrimitiveType::Bytes => matches!(abi_type, DynSolType::Bytes | DynSolType::FixedBytes(_)),
		PrimitiveType::String => matches!(abi_type, DynSolType::String),
		PrimitiveType::Bool => matches!(abi_type, DynSolType::Bool),
	}
}

/// Formats a decoded value for log output.
pub fn format_token_value(token: &DynSolValue) -> String {
	match token {
		DynSolValue::Address(addr) => h160_to_string(*addr),
		DynSolValue::FixedBytes(bytes, size) => format!("0x{}", hex::encode(&bytes[..*size])),
		DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
		DynSolValue::Int(num, _) => num.to_string(),
		DynSolValue::Uint(num, _) => num.to_string(),
		DynSolValue::Bool(b) => b.to_string(),
		DynSolValue::String(s) => s.clone(),
		DynSolValue::Array(values) | DynSolValue::FixedArray(values) => format!(
			"[{}]",
			values
				.iter()
				.map(format_token_value)
				.collect::<Vec<_>>()
				.join(",")
		),
		DynSolValue::Tuple(values) => format!(
			"({})",
			values
				.iter()
				.map(format_token_value)
				.collect::<Vec<_>>()
				.join(",")
		),
		DynSolValue::Function(function) => format!("0x{}", hex::encode(function.as_slice())),
	}
}
