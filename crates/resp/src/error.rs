//! Error types for RESP parsing.

use thiserror::Error;

/// Errors that can occur while parsing a reply stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
	/// Unexpected end of input while parsing
	#[error("Unexpected end of input")]
	UnexpectedEof,

	/// Invalid type marker encountered
	#[error("Invalid type marker: {0}")]
	InvalidTypeMarker(char),

	/// Invalid format for the current type
	#[error("Invalid format: {0}")]
	InvalidFormat(String),

	/// Invalid integer value
	#[error("Invalid integer: {0}")]
	InvalidInteger(String),

	/// Invalid bulk payload length
	#[error("Invalid bulk length: {0}")]
	InvalidBulkLength(i64),

	/// Invalid array length
	#[error("Invalid array length: {0}")]
	InvalidArrayLength(i64),

	/// UTF-8 conversion error
	#[error("UTF-8 error: {0}")]
	Utf8Error(String),
}

impl From<std::str::Utf8Error> for ParseError {
	fn from(e: std::str::Utf8Error) -> Self {
		ParseError::Utf8Error(e.to_string())
	}
}

impl From<std::num::ParseIntError> for ParseError {
	fn from(e: std::num::ParseIntError) -> Self {
		ParseError::InvalidInteger(e.to_string())
	}
}
