//! Tracing subscriber setup driven by environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: "trace", "debug", "info", "warn" or "error"; default is "info"
//! - LOG_DATA_DIR: directory for log files; default is "logs/"
//! - LOG_MAX_SIZE: maximum size of a log file in bytes before rolling; default is 1GB

pub mod error;

use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
	env,
	fs::{create_dir_all, metadata},
	path::Path,
};
use tracing::{info, Subscriber};
use tracing_subscriber::{
	filter::EnvFilter,
	fmt::{
		self,
		format::{Compact, Format, Writer},
		FmtContext, FormatEvent, FormatFields,
	},
	prelude::*,
	registry::LookupSpan,
};

const DEFAULT_LOG_DIR: &str = "logs/";
const DEFAULT_LOG_MAX_SIZE: u64 = 1_073_741_824;
const LOG_FILE_NAME: &str = "action-validator.log";

lazy_static! {
	static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").expect("valid regex");
}

/// Where log events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	File,
}

/// Logging settings read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub mode: LogMode,
	pub level: tracing::Level,
	pub data_dir: String,
	pub max_size: u64,
}

impl LoggingConfig {
	/// Reads the configuration from `LOG_*` environment variables.
	///
	/// Unknown modes and levels fall back to stdout and `info`. An unparsable
	/// `LOG_MAX_SIZE` is reported as an error.
	pub fn from_env() -> Result<Self, String> {
		let mode = match env::var("LOG_MODE")
			.unwrap_or_default()
			.to_lowercase()
			.as_str()
		{
			"file" => LogMode::File,
			_ => LogMode::Stdout,
		};

		let level = match env::var("LOG_LEVEL")
			.unwrap_or_default()
			.to_lowercase()
			.as_str()
		{
			"trace" => tracing::Level::TRACE,
			"debug" => tracing::Level::DEBUG,
			"warn" => tracing::Level::WARN,
			"error" => tracing::Level::ERROR,
			_ => tracing::Level::INFO,
		};

		let data_dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
		let data_dir = format!("{}/", data_dir.trim_end_matches('/'));

		let max_size = match env::var("LOG_MAX_SIZE") {
			Ok(raw) => raw
				.parse::<u64>()
				.map_err(|_| format!("LOG_MAX_SIZE must be a valid u64, got '{}'", raw))?,
			Err(_) => DEFAULT_LOG_MAX_SIZE,
		};

		Ok(Self {
			mode,
			level,
			data_dir,
			max_size,
		})
	}
}

/// Formatter wrapper that removes ANSI colour codes before writing to a file
struct StripAnsiFormatter<T> {
	inner: T,
}

impl<S, N, T> FormatEvent<S, N> for StripAnsiFormatter<T>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
	T: FormatEvent<S, N>,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &tracing::Event<'_>,
	) -> std::fmt::Result {
		let mut buf = String::new();
		self.inner.format_event(ctx, Writer::new(&mut buf), event)?;
		write!(writer, "{}", strip_ansi_escapes(&buf))
	}
}

fn strip_ansi_escapes(s: &str) -> String {
	ANSI_ESCAPE.replace_all(s, "").to_string()
}

/// Computes the path of a rolled log file: `base-<date>.<index>.log`.
pub fn compute_rolled_file_path(base_file_path: &str, date_str: &str, index: u32) -> String {
	let trimmed = base_file_path
		.strip_suffix(".log")
		.unwrap_or(base_file_path);
	format!("{}-{}.{}.log", trimmed, date_str, index)
}

/// Returns the first rolled file path for `date_str` whose size is within `max_size`.
pub fn space_based_rolling(
	file_path: &str,
	base_file_path: &str,
	date_str: &str,
	max_size: u64,
) -> String {
	let mut final_path = file_path.to_string();
	let mut index = 1;
	while let Ok(meta) = metadata(&final_path) {
		if meta.len() <= max_size {
			break;
		}
		index += 1;
		final_path = compute_rolled_file_path(base_file_path, date_str, index);
	}
	final_path
}

fn create_log_format(with_ansi: bool) -> Format<Compact> {
	fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_ansi(with_ansi)
		.compact()
}

/// Installs the global tracing subscriber according to [`LoggingConfig::from_env`].
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();
	let config = LoggingConfig::from_env()?;

	let subscriber = tracing_subscriber::registry().with(EnvFilter::new(config.level.to_string()));

	match config.mode {
		LogMode::File => {
			let base_file_path = format!("{}{}", config.data_dir, LOG_FILE_NAME);
			let date_str = Utc::now().format("%Y-%m-%d").to_string();
			let time_based_path = compute_rolled_file_path(&base_file_path, &date_str, 1);

			if let Some(parent) = Path::new(&time_based_path).parent() {
				create_dir_all(parent)?;
			}

			let final_path = space_based_rolling(
				&time_based_path,
				&base_file_path,
				&date_str,
				config.max_size,
			);

			let file_appender = tracing_appender::rolling::never(
				Path::new(&final_path).parent().unwrap_or(Path::new(".")),
				Path::new(&final_path).file_name().unwrap_or_default(),
			);

			subscriber
				.with(
					fmt::layer()
						.event_format(StripAnsiFormatter {
							inner: create_log_format(false),
						})
						.with_writer(file_appender)
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
		}
		LogMode::Stdout => {
			subscriber
				.with(
					fmt::layer()
						.event_format(create_log_format(true))
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
		}
	}

	info!(mode = ?config.mode, level = %config.level, "Logging configured");
	Ok(())
}
