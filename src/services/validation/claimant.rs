//! Claimant resolution.
//!
//! Runs the same lookup as a step but, instead of evaluating a filter,
//! returns the address found at the configured field of the first candidate
//! that decodes.

use alloy::{
	core::dyn_abi::{DynSolType, DynSolValue},
	primitives::Address,
};
use tracing::debug;

use crate::{
	models::{ActionClaimant, ActionTarget},
	services::{
		blockchain::ProviderPool,
		filter::{extract, helpers::format_token_value, DecodedEntity, FilterError},
		signature::SignatureCatalog,
		validation::{error::ValidationError, session::ValidationSession, step::field_types},
	},
	utils::logging::error::{ErrorMetadata, ErrorSource},
};

fn claimant_metadata(claimant: &ActionClaimant) -> ErrorMetadata {
	ErrorMetadata::from([
		("chain_id".to_string(), claimant.chain_id.to_string()),
		("signature".to_string(), claimant.signature.to_string()),
		("field_index".to_string(), claimant.field_index.to_string()),
	])
}

/// Returns the address credited with the action described by `claimant`.
///
/// Unknown signatures and out-of-range indexes are configuration errors. A
/// missing candidate or a field that is not an address leaves the claimant
/// unresolved.
pub(crate) async fn resolve_claimant<P: ProviderPool>(
	claimant: &ActionClaimant,
	catalog: &dyn SignatureCatalog,
	session: &mut ValidationSession<'_, P>,
) -> Result<Address, ValidationError> {
	let configuration_error = |e: ErrorSource| {
		ValidationError::configuration_error(
			"claimant rule is misconfigured",
			Some(e),
			Some(claimant_metadata(claimant)),
		)
	};

	let entry = catalog
		.resolve(claimant.signature_type, &claimant.signature)
		.map_err(|e| configuration_error(Box::new(e)))?;
	let types = field_types(entry, claimant.field_index())
		.map_err(|e| configuration_error(Box::new(e)))?;

	if let Some(abi_type) = types.iter().find(|abi_type| **abi_type != DynSolType::Address) {
		return Err(ValidationError::claimant_unresolved(
			format!(
				"claimant field {} is {}, not an address",
				claimant.field_index,
				abi_type.sol_type_name()
			),
			None,
			Some(claimant_metadata(claimant)),
		));
	}

	let candidates = session.candidates(claimant).await?;
	debug!(candidates = candidates.len(), "Located claimant candidates");

	for (position, entity) in candidates.entities().into_iter().enumerate() {
		let layout = match entity {
			DecodedEntity::Log(log) => entry.layout_for_topics(log.topics.len()),
			DecodedEntity::Calldata(_) => entry.primary_layout(),
		};

		match extract(entity, layout, claimant.field_index()) {
			Ok(DynSolValue::Address(address)) => {
				debug!(candidate = position, claimant = %address, "Resolved claimant");
				return Ok(address);
			}
			Ok(value) => {
				return Err(ValidationError::claimant_unresolved(
					format!(
						"claimant field decoded as {}, not an address",
						format_token_value(&value)
					),
					None,
					Some(claimant_metadata(claimant)),
				));
			}
			Err(e @ FilterError::DecodeError(_)) => {
				debug!(candidate = position, error = %e, "Skipping claimant candidate");
			}
			Err(e) => return Err(configuration_error(Box::new(e))),
		}
	}

	Err(ValidationError::claimant_unresolved(
		"no entity matching the claimant rule was found",
		None,
		Some(claimant_metadata(claimant)),
	))
}
