//! Parsed argument layout of an event or function.

use alloy::{
	core::{
		dyn_abi::DynSolType,
		json_abi::{Event, Function},
	},
	primitives::B256,
};

use crate::{
	models::SignatureType, services::signature::SignatureError,
	utils::logging::error::ErrorSource,
};

/// Ordered argument layout of one event or function signature.
///
/// Events keep their `indexed` markers, which decide whether an argument is
/// read from the log topics or from the data blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedShape {
	Event(Event),
	Function(Function),
}

impl DecodedShape {
	/// Parses a human-readable signature such as
	/// `event Transfer(address indexed from, address indexed to, uint256 value)`.
	///
	/// The leading `event`/`function` keyword is optional.
	pub fn parse(signature_type: SignatureType, signature: &str) -> Result<Self, SignatureError> {
		let body = strip_keyword(signature.trim());
		let invalid = |e: ErrorSource| {
			SignatureError::invalid_signature(
				format!("failed to parse signature '{}'", signature),
				Some(e),
				None,
			)
		};

		match signature_type {
			SignatureType::Event => Event::parse(&format!("event {}", body))
				.map(Self::Event)
				.map_err(|e| invalid(Box::new(e))),
			SignatureType::Func => Function::parse(&format!("function {}", body))
				.map(Self::Function)
				.map_err(|e| invalid(Box::new(e))),
		}
	}

	pub fn signature_type(&self) -> SignatureType {
		match self {
			Self::Event(_) => SignatureType::Event,
			Self::Function(_) => SignatureType::Func,
		}
	}

	/// Topic hash for events; 4-byte selector right-padded to 32 bytes for functions.
	pub fn selector(&self) -> B256 {
		match self {
			Self::Event(event) => event.selector(),
			Self::Function(function) => B256::right_padding_from(function.selector().as_slice()),
		}
	}

	/// Canonical signature, e.g. `Transfer(address,address,uint256)`.
	pub fn canonical_signature(&self) -> String {
		match self {
			Self::Event(event) => event.signature(),
			Self::Function(function) => function.signature(),
		}
	}

	pub fn name(&self) -> &str {
		match self {
			Self::Event(event) => &event.name,
			Self::Function(function) => &function.name,
		}
	}

	/// Number of arguments in declaration order.
	pub fn arity(&self) -> usize {
		match self {
			Self::Event(event) => event.inputs.len(),
			Self::Function(function) => function.inputs.len(),
		}
	}

	/// Number of indexed event arguments; always 0 for functions.
	pub fn indexed_count(&self) -> usize {
		match self {
			Self::Event(event) => event.inputs.iter().filter(|p| p.indexed).count(),
			Self::Function(_) => 0,
		}
	}

	pub fn is_indexed(&self, index: usize) -> bool {
		match self {
			Self::Event(event) => event.inputs.get(index).is_some_and(|p| p.indexed),
			Self::Function(_) => false,
		}
	}

	/// ABI type of the argument at `index`, or `None` past the arity.
	pub fn field_type(&self, index: usize) -> Option<DynSolType> {
		let selector_type = match self {
			Self::Event(event) => event.inputs.get(index)?.selector_type(),
			Self::Function(function) => function.inputs.get(index)?.selector_type(),
		};
		selector_type.parse().ok()
	}

	/// Type of the value extraction yields at `index`.
	///
	/// Indexed arguments of dynamic type are stored as their keccak hash, so
	/// only a `bytes32` can be read back from the topic.
	pub fn extracted_type(&self, index: usize) -> Option<DynSolType> {
		let ty = self.field_type(index)?;
		if self.is_indexed(index) && !is_value_type(&ty) {
			return Some(DynSolType::FixedBytes(32));
		}
		Some(ty)
	}

	/// Argument names and ABI types in declaration order.
	pub fn fields(&self) -> Vec<(String, String)> {
		match self {
			Self::Event(event) => event
				.inputs
				.iter()
				.map(|p| (p.name.clone(), p.selector_type().into_owned()))
				.collect(),
			Self::Function(function) => function
				.inputs
				.iter()
				.map(|p| (p.name.clone(), p.selector_type().into_owned()))
				.collect(),
		}
	}
}

fn is_value_type(ty: &DynSolType) -> bool {
	matches!(
		ty,
		DynSolType::Address
			| DynSolType::Bool
			| DynSolType::Int(_)
			| DynSolType::Uint(_)
			| DynSolType::FixedBytes(_)
			| DynSolType::Function
	)
}

fn strip_keyword(signature: &str) -> &str {
	["event ", "function "]
		.iter()
		.find_map(|keyword| signature.strip_prefix(keyword))
		.map(str::trim_start)
		.unwrap_or(signature)
}
