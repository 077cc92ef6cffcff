//! Shared constants and line scanning helpers.

use memchr::memchr_iter;

use crate::error::ParseError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Reply type markers
pub const STATUS: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Locate the first CRLF-terminated line in `buf`.
///
/// Returns the line without its terminator and the total number of bytes
/// it occupies (line plus CRLF), or `None` when no full line has arrived
/// yet. Never consumes anything: callers advance the buffer themselves
/// once they know the whole frame is present.
#[inline]
pub fn peek_line(buf: &[u8]) -> Option<(&[u8], usize)> {
	for pos in memchr_iter(b'\r', buf) {
		if pos + 1 >= buf.len() {
			// Trailing '\r' with no byte after it: could still become CRLF.
			return None;
		}
		if buf[pos + 1] == b'\n' {
			return Some((&buf[..pos], pos + 2));
		}
	}
	None
}

/// Parse a decimal integer from a line.
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, ParseError> {
	let s = std::str::from_utf8(buf)?;
	Ok(s.parse::<i64>()?)
}
