//! Error types for field extraction and filter evaluation.
//!
//! Every variant except [`FilterError::DecodeError`] means the action rule is
//! misconfigured. A decode error only concerns the candidate being decoded.

use crate::utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError};
use thiserror::Error as ThisError;

/// Represents errors that can occur while extracting or comparing a field
#[derive(ThisError, Debug)]
pub enum FilterError {
	/// The field index is beyond the arity of the signature
	#[error("Field out of range: {0}")]
	FieldOutOfRange(ErrorContext),

	/// A log or calldata payload does not decode under the resolved layout
	#[error("Decode error: {0}")]
	DecodeError(ErrorContext),

	/// The filter type is not defined for the field type
	#[error("Unsupported filter: {0}")]
	UnsupportedFilter(ErrorContext),

	/// The filter operand has the wrong width or encoding for the field type
	#[error("Invalid filter data: {0}")]
	InvalidFilterData(ErrorContext),

	/// The decoded value cannot be compared as the configured field type
	#[error("Type mismatch: {0}")]
	TypeMismatch(ErrorContext),
}

impl FilterError {
	pub fn field_out_of_range(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::FieldOutOfRange(ErrorContext::new(msg, source, metadata))
	}

	pub fn decode_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::DecodeError(ErrorContext::new(msg, source, metadata))
	}

	pub fn unsupported_filter(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::UnsupportedFilter(ErrorContext::new(msg, source, metadata))
	}

	pub fn invalid_filter_data(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::InvalidFilterData(ErrorContext::new(msg, source, metadata))
	}

	pub fn type_mismatch(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::TypeMismatch(ErrorContext::new(msg, source, metadata))
	}

	/// True unless the error only concerns one undecodable candidate.
	pub fn is_configuration_error(&self) -> bool {
		!matches!(self, Self::DecodeError(_))
	}
}

impl TraceableError for FilterError {
	fn trace_id(&self) -> String {
		match self {
			Self::FieldOutOfRange(ctx)
			| Self::DecodeError(ctx)
			| Self::UnsupportedFilter(ctx)
			| Self::InvalidFilterData(ctx)
			| Self::TypeMismatch(ctx) => ctx.trace_id.clone(),
		}
	}
}
