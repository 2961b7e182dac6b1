//! Action payload loading and static validation.
//!
//! Everything checked here needs no chain data, so the engine runs it before
//! the first fetch.

use async_trait::async_trait;
use std::path::Path;

use crate::{
	models::{
		config::{error::ConfigError, load_json_dir},
		ActionStep, ConfigLoader, EventActionPayload,
	},
	utils::logging::error::ErrorMetadata,
};

impl ActionStep {
	/// Checks filter/type compatibility and the width of `filter_data`.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let parameter = &self.action_parameter;
		let metadata = || {
			Some(ErrorMetadata::from([
				("signature".to_string(), self.signature.to_string()),
				("chain_id".to_string(), self.chain_id.to_string()),
				("field_index".to_string(), parameter.field_index.to_string()),
			]))
		};

		if !parameter.filter_type.is_defined_for(parameter.field_type) {
			return Err(ConfigError::validation_error(
				format!(
					"filter {:?} is not defined for field type {:?}",
					parameter.filter_type, parameter.field_type
				),
				None,
				metadata(),
			));
		}

		if !parameter
			.field_type
			.accepts_filter_data(&parameter.filter_data)
		{
			return Err(ConfigError::validation_error(
				format!(
					"filter data of {} bytes is not a valid {:?} operand",
					parameter.filter_data.len(),
					parameter.field_type
				),
				None,
				metadata(),
			));
		}

		Ok(())
	}
}

#[async_trait]
impl ConfigLoader for EventActionPayload {
	async fn resolve_secrets(&self) -> Result<Self, ConfigError> {
		Ok(self.clone())
	}

	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		load_json_dir::<Self, T>(path.unwrap_or(Path::new("config/actions"))).await
	}

	async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		let path_metadata = || {
			Some(ErrorMetadata::from([(
				"path".to_string(),
				path.display().to_string(),
			)]))
		};

		let file = std::fs::File::open(path).map_err(|e| {
			ConfigError::file_error(
				format!("failed to open action payload file: {}", e),
				Some(Box::new(e)),
				path_metadata(),
			)
		})?;
		let payload: EventActionPayload = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse action payload: {}", e),
				Some(Box::new(e)),
				path_metadata(),
			)
		})?;

		payload.validate()?;
		Ok(payload)
	}

	/// Validates every step in order and reports the first broken one.
	///
	/// An empty step list is valid: such an action is satisfied by any context.
	fn validate(&self) -> Result<(), ConfigError> {
		for (index, step) in self.action_steps.iter().enumerate() {
			step.validate().map_err(|e| {
				ConfigError::validation_error(
					format!("action step {} is misconfigured", index),
					Some(Box::new(e)),
					Some(ErrorMetadata::from([(
						"step".to_string(),
						index.to_string(),
					)])),
				)
			})?;
		}
		Ok(())
	}

	// Payloads are keyed by file name only; identical rules for two boosts are allowed.
	fn validate_uniqueness(
		_instances: &[&Self],
		_current_instance: &Self,
		_file_path: &str,
	) -> Result<(), ConfigError> {
		Ok(())
	}
}
