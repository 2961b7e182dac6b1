//! Errors raised while connecting to a chain or reading data from it.
//!
//! The provider boundary returns them wrapped in `anyhow::Error`; callers
//! downcast when they need the variant.

use crate::utils::logging::error::{ErrorContext, ErrorMetadata, ErrorSource, TraceableError};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum BlockChainError {
	/// No configured endpoint of the network could be reached
	#[error("Connection error: {0}")]
	ConnectionError(ErrorContext),

	/// The node answered with a JSON-RPC error
	#[error("Request error: {0}")]
	RequestError(ErrorContext),

	/// The node answered but the result does not have the expected shape
	#[error("Unexpected response: {0}")]
	UnexpectedResponse(ErrorContext),

	/// No client can be created for the requested chain
	#[error("Client pool error: {0}")]
	ClientPoolError(ErrorContext),
}

impl BlockChainError {
	pub fn connection_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ConnectionError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn request_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::RequestError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn unexpected_response(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::UnexpectedResponse(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn client_pool_error(
		msg: impl Into<String>,
		source: Option<ErrorSource>,
		metadata: Option<ErrorMetadata>,
	) -> Self {
		Self::ClientPoolError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for BlockChainError {
	fn trace_id(&self) -> String {
		match self {
			Self::ConnectionError(ctx)
			| Self::RequestError(ctx)
			| Self::UnexpectedResponse(ctx)
			| Self::ClientPoolError(ctx) => ctx.trace_id.clone(),
		}
	}
}
