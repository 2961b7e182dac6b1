//! Error types for action validation.
//!
//! The three variants are the only failures visible at the engine boundary.
//! An action that simply has not happened yet is `Ok(false)`, never an error.

use crate::{
	models::ConfigError,
	services::{filter::FilterError, signature::SignatureError},
	utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError},
};
use thiserror::Error as ThisError;

/// Represents errors that abort a validation call
#[derive(ThisError, Debug)]
pub enum ValidationError {
	/// The action rule or the validation context is broken
	#[error("Configuration error: {0}")]
	ConfigurationError(ErrorContext),

	/// Chain data could not be fetched
	#[error("Transport error: {0}")]
	TransportError(ErrorContext),

	/// No address could be attributed to the action
	#[error("Claimant unresolved: {0}")]
	ClaimantUnresolved(ErrorContext),
}

impl ValidationError {
	// Configuration error
	pub fn configuration_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ConfigurationError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Transport error
	pub fn transport_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::TransportError(ErrorContext::new_with_log(msg, source, metadata))
	}

	// Claimant unresolved
	pub fn claimant_unresolved(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ClaimantUnresolved(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn is_configuration_error(&self) -> bool {
		matches!(self, Self::ConfigurationError(_))
	}

	pub fn is_transport_error(&self) -> bool {
		matches!(self, Self::TransportError(_))
	}
}

impl TraceableError for ValidationError {
	fn trace_id(&self) -> String {
		match self {
			Self::ConfigurationError(ctx)
			| Self::TransportError(ctx)
			| Self::ClaimantUnresolved(ctx) => ctx.trace_id.clone(),
		}
	}
}

impl From<SignatureError> for ValidationError {
	fn from(error: SignatureError) -> Self {
		Self::configuration_error("signature cannot be resolved", Some(Box::new(error)), None)
	}
}

impl From<FilterError> for ValidationError {
	fn from(error: FilterError) -> Self {
		Self::configuration_error("action parameter is misconfigured", Some(Box::new(error)), None)
	}
}

impl From<ConfigError> for ValidationError {
	fn from(error: ConfigError) -> Self {
		Self::configuration_error("action payload is invalid", Some(Box::new(error)), None)
	}
}
