//! Configuration loading and validation.
//!
//! Networks and action payloads are stored as JSON files and loaded through
//! the [`ConfigLoader`] trait.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use std::path::Path;

mod error;
mod network_config;
mod payload_config;

pub use error::ConfigError;

/// Common interface for loading configuration files
#[async_trait]
pub trait ConfigLoader: Sized {
	/// Load all configuration files from a directory
	///
	/// If no path is provided, uses the default config directory.
	async fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	/// Load configuration from a specific file path
	async fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the configuration
	fn validate(&self) -> Result<(), ConfigError>;

	/// Resolve `env:` references in the configuration
	async fn resolve_secrets(&self) -> Result<Self, ConfigError>;

	/// Check if a file is a JSON file based on extension
	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}

	/// Validate that `current_instance` does not collide with already loaded instances
	fn validate_uniqueness(
		instances: &[&Self],
		current_instance: &Self,
		file_path: &str,
	) -> Result<(), ConfigError>;
}

/// Reads every JSON file of `dir` through `load`, keyed by file stem.
pub(crate) async fn load_json_dir<C, T>(dir: &Path) -> Result<T, ConfigError>
where
	C: ConfigLoader + Send + Sync,
	T: FromIterator<(String, C)>,
{
	let path_metadata = || {
		Some(crate::utils::logging::error::ErrorMetadata::from([(
			"path".to_string(),
			dir.display().to_string(),
		)]))
	};

	if !dir.exists() {
		return Err(ConfigError::file_error(
			"configuration directory not found",
			None,
			path_metadata(),
		));
	}

	let mut entries = std::fs::read_dir(dir)
		.map_err(|e| {
			ConfigError::file_error(
				format!("failed to read configuration directory: {}", e),
				Some(Box::new(e)),
				path_metadata(),
			)
		})?
		.collect::<Result<Vec<_>, _>>()?;
	entries.sort_by_key(|entry| entry.path());

	let mut pairs: Vec<(String, C)> = Vec::new();
	for entry in entries {
		let path = entry.path();
		if !C::is_json_file(&path) {
			continue;
		}

		let name = path
			.file_stem()
			.and_then(|s| s.to_str())
			.unwrap_or("unknown")
			.to_string();

		let config = C::load_from_path(&path).await?;
		let existing: Vec<&C> = pairs.iter().map(|(_, c)| c).collect();
		C::validate_uniqueness(&existing, &config, &path.display().to_string())?;

		pairs.push((name, config));
	}

	Ok(T::from_iter(pairs))
}
