//! Error context shared by every error type in the crate.
//!
//! [`ErrorContext`] carries a message, an optional source error, key/value
//! metadata, a creation timestamp and a trace id. The trace id is inherited
//! from the source chain when one of the wrapped errors already has one, so a
//! transport failure and the validation error it causes can be correlated in
//! the logs.

use chrono::Utc;
use std::{collections::BTreeMap, fmt};
use uuid::Uuid;

/// Boxed source error accepted by every error constructor.
pub type ErrorSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Metadata attached to an error. Ordered so formatting is stable.
pub type ErrorMetadata = BTreeMap<String, String>;

/// A context wrapper for errors with additional metadata.
#[derive(Debug)]
pub struct ErrorContext {
	/// The error message
	pub message: String,
	/// The source error that caused this error
	pub source: Option<ErrorSource>,
	/// Additional metadata about the error
	pub metadata: Option<ErrorMetadata>,
	/// The timestamp of the error in RFC 3339 format
	pub timestamp: String,
	/// The unique identifier for the error (UUID v4)
	pub trace_id: String,
}

impl ErrorContext {
	/// Creates a new error context without logging it.
	///
	/// The trace id is taken from the source chain when available, otherwise a
	/// fresh UUID is generated.
	pub fn new(
		message: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		let trace_id = match source.as_deref() {
			Some(src) => TraceableError::trace_id(src),
			None => Uuid::new_v4().to_string(),
		};

		Self {
			message: message.into(),
			source,
			metadata,
			timestamp: Utc::now().to_rfc3339(),
			trace_id,
		}
	}

	/// Creates a new error context and emits it as a structured `error` event.
	pub fn new_with_log(
		message: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		let context = Self::new(message, source, metadata);
		log_error(&context);
		context
	}

	/// Adds a single key/value pair to the metadata.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.metadata
			.get_or_insert_with(BTreeMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// Formats the message followed by `[key=value, ...]` when metadata is present.
	pub fn format_with_metadata(&self) -> String {
		match &self.metadata {
			Some(metadata) if !metadata.is_empty() => {
				let parts = metadata
					.iter()
					.map(|(key, value)| format!("{}={}", key, value))
					.collect::<Vec<_>>()
					.join(", ");
				format!("{} [{}]", self.message, parts)
			}
			_ => self.message.clone(),
		}
	}
}

impl fmt::Display for ErrorContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_with_metadata())
	}
}

impl std::error::Error for ErrorContext {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.source
			.as_ref()
			.map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
	}
}

/// A trait for errors that can provide a trace ID
pub trait TraceableError: std::error::Error + Send + Sync {
	/// Returns the trace ID for this error
	fn trace_id(&self) -> String;
}

impl TraceableError for dyn std::error::Error + Send + Sync + 'static {
	fn trace_id(&self) -> String {
		const MAX_DEPTH: usize = 3;

		if let Some(id) = try_extract_trace_id(self) {
			return id;
		}

		let mut source = self.source();
		let mut depth = 0;
		while let Some(err) = source {
			depth += 1;
			if depth > MAX_DEPTH {
				break;
			}
			if let Some(id) = try_extract_trace_id(err) {
				return id;
			}
			source = err.source();
		}

		Uuid::new_v4().to_string()
	}
}

fn try_extract_trace_id(err: &(dyn std::error::Error + 'static)) -> Option<String> {
	if let Some(ctx) = err.downcast_ref::<ErrorContext>() {
		return Some(ctx.trace_id.clone());
	}

	macro_rules! try_downcast {
		($($ty:path),*) => {
			$(
				if let Some(e) = err.downcast_ref::<$ty>() {
					return Some(e.trace_id());
				}
			)*
		}
	}

	try_downcast!(
		crate::services::validation::ValidationError,
		crate::services::filter::FilterError,
		crate::services::signature::SignatureError,
		crate::services::blockchain::BlockChainError,
		crate::services::blockchain::TransportError,
		crate::models::ConfigError
	);

	None
}

/// Strips HTML bodies some RPC gateways return in error responses.
fn sanitize_error_message(message: &str) -> String {
	let has_html = ["<html>", "<head>", "<body>"]
		.iter()
		.any(|tag| message.contains(tag));
	match message.find('<') {
		Some(pos) if has_html => message[..pos].trim().to_string(),
		_ => message.to_string(),
	}
}

fn format_error_chain(err: &dyn std::error::Error) -> String {
	let mut result = sanitize_error_message(&err.to_string());
	let mut source = err.source();

	while let Some(err) = source {
		result.push_str("\n\tCaused by: ");
		result.push_str(&sanitize_error_message(&err.to_string()));
		source = err.source();
	}

	result
}

fn log_error(error: &ErrorContext) {
	match &error.source {
		Some(err) => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			error.chain = %format_error_chain(&**err),
			"Error occurred"
		),
		None => tracing::error!(
			message = error.format_with_metadata(),
			trace_id = %error.trace_id,
			timestamp = %error.timestamp,
			"Error occurred"
		),
	}
}
