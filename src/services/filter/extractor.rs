//! Field extraction from logs and calldata.
//!
//! Field indices are logical: they count every argument in declaration
//! order. For events the extractor maps the index onto either the topics
//! (indexed arguments) or the ABI-encoded data blob (the rest).

use alloy::{
	core::dyn_abi::{DynSolType, DynSolValue, EventExt},
	primitives::LogData,
};

use crate::{
	models::{EVMReceiptLog, SignatureType},
	services::{filter::FilterError, signature::DecodedShape},
	utils::logging::error::ErrorMetadata,
};

/// A log or calldata payload located for a step
#[derive(Debug, Clone, Copy)]
pub enum DecodedEntity<'a> {
	Log(&'a EVMReceiptLog),
	Calldata(&'a [u8]),
}

impl DecodedEntity<'_> {
	pub fn signature_type(&self) -> SignatureType {
		match self {
			Self::Log(_) => SignatureType::Event,
			Self::Calldata(_) => SignatureType::Func,
		}
	}
}

/// Returns the raw value of argument `field_index` of `entity`.
///
/// Indexed arguments of dynamic type come back as their 32-byte topic.
pub fn extract(
	entity: DecodedEntity<'_>,
	shape: &DecodedShape,
	field_index: usize,
) -> Result<DynSolValue, FilterError> {
	if field_index >= shape.arity() {
		return Err(FilterError::field_out_of_range(
			format!(
				"field index {} is out of range for {} with {} arguments",
				field_index,
				shape.canonical_signature(),
				shape.arity()
			),
			None,
			Some(ErrorMetadata::from([(
				"field_index".to_string(),
				field_index.to_string(),
			)])),
		));
	}

	match (entity, shape) {
		(DecodedEntity::Log(log), DecodedShape::Event(event)) => {
			let log_data = LogData::new(log.topics.clone(), log.data.clone()).ok_or_else(|| {
				FilterError::decode_error(
					format!("log carries {} topics, at most 4 allowed", log.topics.len()),
					None,
					None,
				)
			})?;
			let decoded = event.decode_log(&log_data).map_err(|e| {
				FilterError::decode_error(
					format!("failed to decode log as {}", shape.canonical_signature()),
					Some(Box::new(e)),
					None,
				)
			})?;

			let (values, position) = if shape.is_indexed(field_index) {
				let position = event.inputs[..field_index]
					.iter()
					.filter(|p| p.indexed)
					.count();
				(decoded.indexed, position)
			} else {
				let position = event.inputs[..field_index]
					.iter()
					.filter(|p| !p.indexed)
					.count();
				(decoded.body, position)
			};

			values.into_iter().nth(position).ok_or_else(|| {
				FilterError::decode_error(
					format!("decoded log has no value for argument {}", field_index),
					None,
					None,
				)
			})
		}
		(DecodedEntity::Calldata(input), DecodedShape::Function(_)) => {
			let Some(params_blob) = input.get(4..) else {
				return Err(FilterError::decode_error(
					format!("calldata of {} bytes carries no selector", input.len()),
					None,
					None,
				));
			};

			let types = (0..shape.arity())
				.map(|index| shape.field_type(index))
				.collect::<Option<Vec<_>>>()
				.ok_or_else(|| {
					FilterError::decode_error(
						format!(
							"unsupported argument type in {}",
							shape.canonical_signature()
						),
						None,
						None,
					)
				})?;

			match DynSolType::Tuple(types).abi_decode_params(params_blob) {
				Ok(DynSolValue::Tuple(values)) => {
					values.into_iter().nth(field_index).ok_or_else(|| {
						FilterError::decode_error(
							format!("decoded calldata has no value for argument {}", field_index),
							None,
							None,
						)
					})
				}
				Ok(_) => Err(FilterError::decode_error(
					"calldata did not decode to a tuple",
					None,
					None,
				)),
				Err(e) => Err(FilterError::decode_error(
					format!(
						"failed to decode calldata as {}",
						shape.canonical_signature()
					),
					Some(Box::new(e)),
					None,
				)),
			}
		}
		(entity, shape) => Err(FilterError::type_mismatch(
			format!(
				"cannot read a {:?} entity with a {:?} signature",
				entity.signature_type(),
				shape.signature_type()
			),
			None,
			None,
		)),
	}
}
