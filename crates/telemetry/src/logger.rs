use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TelemetryError;

/// Custom time formatter that displays time as "YYYY-MM-DD HH:MM:SS.micros"
struct CustomTimeFormat;

impl FormatTime for CustomTimeFormat {
	fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
		let now = std::time::SystemTime::now();
		let datetime: chrono::DateTime<chrono::Local> = now.into();
		write!(w, "{}", datetime.format("[%Y-%m-%d %H:%M:%S%.6f]"))
	}
}

type ReloadHandle = reload::Handle<EnvFilter, Registry>;

static RELOAD_HANDLE: OnceLock<ReloadHandle> = OnceLock::new();

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

fn parse_level(level: &str) -> Result<EnvFilter, TelemetryError> {
	let level_lower = level.to_lowercase();
	if !VALID_LEVELS.contains(&level_lower.as_str()) {
		return Err(TelemetryError::InvalidLogLevel(level.to_string()));
	}
	Ok(EnvFilter::new(level_lower))
}

/// Initialize the logger with the provided log level
///
/// This sets up a console logger with:
/// - The log level from the `level` parameter
/// - Structured output with timestamps in format: YYYY-MM-DD HH:MM:SS.micros
/// - Thread ids, no file/line noise
///
/// Records emitted through the `log` facade are picked up as well.
///
/// # Arguments
///
/// * `level` - The log level filter string (e.g., "info", "debug", "warn")
///
/// # Example
///
/// ```no_run
/// telemetry::init("info")?;
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Returns an error if the level string is invalid or a global
/// subscriber is already installed.
pub fn init(level: &str) -> Result<(), TelemetryError> {
	let env_filter = parse_level(level)?;

	let (filter_layer, reload_handle) = reload::Layer::new(env_filter);
	let _ = RELOAD_HANDLE.set(reload_handle);

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(
			fmt::layer()
				.with_timer(CustomTimeFormat)
				.with_target(false)
				.with_thread_ids(true)
				.with_line_number(false)
				.with_file(false),
		)
		.try_init()
		.map_err(|e| TelemetryError::InitFailed(e.to_string()))
}

/// Reload the log level dynamically
///
/// # Arguments
///
/// * `level` - The new log level to set. Valid values: trace, debug, info,
///   warn, error
///
/// # Example
///
/// ```no_run
/// # use telemetry::logger::reload_log_level;
/// reload_log_level("debug")?;
/// # Ok::<(), telemetry::TelemetryError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The logger has not been initialized
/// - The provided log level is invalid
/// - The reload operation fails
pub fn reload_log_level(level: &str) -> Result<(), TelemetryError> {
	let new_filter = parse_level(level)?;

	let handle = RELOAD_HANDLE.get().ok_or(TelemetryError::NotInitialized)?;

	handle
		.reload(new_filter)
		.map_err(|e| TelemetryError::ReloadFailed(e.to_string()))
}
