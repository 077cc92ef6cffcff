//! Error types for the bridge.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the client.
#[derive(Error, Debug)]
pub enum Error {
	/// Establishing the transport failed
	#[error("Failed to connect to {addr}: {source}")]
	Connect {
		addr: String,
		#[source]
		source: std::io::Error,
	},

	/// The handle has already been released
	#[error("Connection is closed")]
	ConnectionClosed,

	/// Command failed shape validation, nothing was sent
	#[error("Invalid command: {0}")]
	InvalidCommand(String),

	/// The server answered with an error reply
	#[error("Server error: {0}")]
	Reply(String),

	/// The reply stream was malformed
	#[error("Protocol error: {0}")]
	Protocol(#[from] resp::ParseError),

	/// The server closed the connection mid-conversation
	#[error("Connection reset by server")]
	Disconnected,

	/// Transport-level I/O failure
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
