//! Error types for signature resolution.

use crate::utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError};
use thiserror::Error as ThisError;

/// Represents errors raised while registering or resolving signatures
#[derive(ThisError, Debug)]
pub enum SignatureError {
	/// The signature hash is unknown to every consulted catalog
	#[error("Signature not found: {0}")]
	NotFound(ErrorContext),

	/// A human-readable signature could not be parsed into a layout
	#[error("Invalid signature: {0}")]
	InvalidSignature(ErrorContext),
}

impl SignatureError {
	// Not logged: the engine decides whether a missing signature is fatal.
	pub fn not_found(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::NotFound(ErrorContext::new(msg, source, metadata))
	}

	pub fn invalid_signature(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::InvalidSignature(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for SignatureError {
	fn trace_id(&self) -> String {
		match self {
			Self::NotFound(ctx) | Self::InvalidSignature(ctx) => ctx.trace_id.clone(),
		}
	}
}
