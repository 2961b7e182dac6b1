//! Errors raised while exchanging JSON-RPC messages with a node.

use crate::utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
	/// The node answered with a non-success HTTP status
	#[error("RPC endpoint {url} answered with status {status_code}")]
	Http {
		status_code: reqwest::StatusCode,
		url: String,
		body: String,
		context: ErrorContext,
	},

	/// The request never reached the node or the connection dropped
	#[error("RPC endpoint unreachable: {0}")]
	Unreachable(ErrorContext),

	/// The response body is not a JSON document
	#[error("Malformed RPC response: {0}")]
	MalformedResponse(ErrorContext),
}

impl TransportError {
	pub fn http(
		status_code: reqwest::StatusCode,
		url: String,
		body: String,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		let msg = format!("RPC endpoint {} answered with status {}", url, status_code);

		Self::Http {
			status_code,
			url,
			body,
			context: ErrorContext::new_with_log(msg, None, metadata),
		}
	}

	pub fn unreachable(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::Unreachable(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn malformed_response(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::MalformedResponse(ErrorContext::new_with_log(msg, source, metadata))
	}

	/// HTTP status of the failed request, when the node answered at all.
	pub fn status_code(&self) -> Option<reqwest::StatusCode> {
		match self {
			Self::Http { status_code, .. } => Some(*status_code),
			_ => None,
		}
	}
}

impl TraceableError for TransportError {
	fn trace_id(&self) -> String {
		match self {
			Self::Http { context, .. } => context.trace_id.clone(),
			Self::Unreachable(ctx) | Self::MalformedResponse(ctx) => ctx.trace_id.clone(),
		}
	}
}
