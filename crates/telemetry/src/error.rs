use thiserror::Error;

/// Errors from logger setup and reconfiguration.
#[derive(Error, Debug)]
pub enum TelemetryError {
	/// A global subscriber was already installed
	#[error("Failed to install the global subscriber: {0}")]
	InitFailed(String),

	/// `reload_log_level` was called before `init`
	#[error("Logger has not been initialized")]
	NotInitialized,

	/// The level string is not one of trace, debug, info, warn, error
	#[error("Invalid log level: {0}")]
	InvalidLogLevel(String),

	/// The subscriber rejected the new filter
	#[error("Failed to reload log level: {0}")]
	ReloadFailed(String),
}
