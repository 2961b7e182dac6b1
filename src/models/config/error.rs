//! Configuration error types.

use crate::utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError};
use thiserror::Error as ThisError;

/// Represents errors that can occur while loading or validating configuration
#[derive(ThisError, Debug)]
pub enum ConfigError {
	/// Configuration is well-formed but violates a rule
	#[error("Validation error: {0}")]
	ValidationError(ErrorContext),

	/// Configuration could not be parsed
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),

	/// Configuration file could not be read
	#[error("File error: {0}")]
	FileError(ErrorContext),
}

impl ConfigError {
	// Not logged here; the caller logs with the file path in scope.
	pub fn validation_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ValidationError(ErrorContext::new(msg, source, metadata))
	}

	pub fn parse_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ParseError(ErrorContext::new(msg, source, metadata))
	}

	pub fn file_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::FileError(ErrorContext::new(msg, source, metadata))
	}
}

impl TraceableError for ConfigError {
	fn trace_id(&self) -> String {
		match self {
			Self::ValidationError(ctx) | Self::ParseError(ctx) | Self::FileError(ctx) => {
				ctx.trace_id.clone()
			}
		}
	}
}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error(err.to_string(), Some(Box::new(err)), None)
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(err.to_string(), Some(Box::new(err)), None)
	}
}
