//! Network configuration loading and validation.

use async_trait::async_trait;
use std::path::Path;

use crate::{
	models::{
		config::{error::ConfigError, load_json_dir},
		ConfigLoader, Network,
	},
	utils::logging::error::ErrorMetadata,
};

const ENV_URL_PREFIX: &str = "env:";

impl Network {
	fn validate_protocol(&self) {
		for rpc_url in &self.rpc_urls {
			if rpc_url.url.starts_with("http://") {
				tracing::warn!(
					"Network '{}' uses an insecure RPC URL: {}",
					self.slug,
					rpc_url.url
				);
			}
		}
	}
}

#[async_trait]
impl ConfigLoader for Network {
	async fn resolve_secrets(&self) -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();
		let mut network = self.clone();

		for rpc_url in &mut network.rpc_urls {
			if let Some(var) = rpc_url.url.strip_prefix(ENV_URL_PREFIX) {
				rpc_url.url = std::env::var(var).map_err(|e| {
					ConfigError::parse_error(
						format!("failed to resolve RPC URL from environment: {}", e),
						Some(Box::new(e)),
						Some(ErrorMetadata::from([(
							"variable".to_string(),
							var.to_string(),
						)])),
					)
				})?;
			}
		}
		Ok(network)
	}

	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>,
	{
		load_json_dir::<Self, T>(path.unwrap_or(Path::new("config/networks"))).await
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
				format!("failed to open network config file: {}", e),
				Some(Box::new(e)),
				path_metadata(),
			)
		})?;
		let config: Network = serde_json::from_reader(file).map_err(|e| {
			ConfigError::parse_error(
				format!("failed to parse network config: {}", e),
				Some(Box::new(e)),
				path_metadata(),
			)
		})?;

		let config = config.resolve_secrets().await?;
		config.validate()?;

		Ok(config)
	}

	/// Ensures that:
	/// - The network has a name and a slug made of `[a-z0-9_]`
	/// - The chain id is non-zero
	/// - At least one RPC URL is usable (`rpc` type, http(s), weight 0-100)
	/// - Block time and lookback window are reasonable
	fn validate(&self) -> Result<(), ConfigError> {
		if self.name.is_empty() {
			return Err(ConfigError::validation_error(
				"Network name is required",
				None,
				None,
			));
		}

		if self.slug.is_empty()
			|| !self
				.slug
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
		{
			return Err(ConfigError::validation_error(
				"Slug must contain only lowercase letters, numbers, and underscores",
				None,
				None,
			));
		}

		if self.chain_id == 0 {
			return Err(ConfigError::validation_error(
				"Chain id must be greater than 0",
				None,
				None,
			));
		}

		if self.rpc_urls.is_empty() {
			return Err(ConfigError::validation_error(
				"At least one RPC URL is required",
				None,
				None,
			));
		}

		if !self.rpc_urls.iter().all(|rpc_url| rpc_url.type_ == "rpc") {
			return Err(ConfigError::validation_error(
				"RPC URL type must be one of: rpc",
				None,
				None,
			));
		}

		if !self.rpc_urls.iter().all(|rpc_url| {
			rpc_url.url.starts_with("http://")
				|| rpc_url.url.starts_with("https://")
				|| rpc_url.url.starts_with(ENV_URL_PREFIX)
		}) {
			return Err(ConfigError::validation_error(
				"All RPC URLs must start with http://, https:// or env:",
				None,
				None,
			));
		}

		if !self.rpc_urls.iter().all(|rpc_url| rpc_url.weight <= 100) {
			return Err(ConfigError::validation_error(
				"All RPC URL weights must be between 0 and 100",
				None,
				None,
			));
		}

		if self.block_time_ms < 100 {
			return Err(ConfigError::validation_error(
				"Block time must be at least 100ms",
				None,
				None,
			));
		}

		if self.max_log_lookback_blocks == Some(0) {
			return Err(ConfigError::validation_error(
				"max_log_lookback_blocks must be greater than 0",
				None,
				None,
			));
		}

		self.validate_protocol();

		Ok(())
	}

	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError> {
		let duplicate = instances.iter().find_map(|existing| {
			if existing.slug == current_instance.slug {
				Some(("slug", current_instance.slug.clone()))
			} else if existing.chain_id == current_instance.chain_id {
				Some(("chain_id", current_instance.chain_id.to_string()))
			} else {
				None
			}
		});

		match duplicate {
			Some((field, value)) => Err(ConfigError::validation_error(
				format!("Duplicate network {} found: '{}'", field, value),
				None,
				Some(ErrorMetadata::from([
					("field".to_string(), field.to_string()),
					("path".to_string(), file_path.to_string()),
				])),
			)),
			None => Ok(()),
		}
	}
}
