//! Streaming RESP reply parser with zero-copy bulk payloads.

use bytes::Buf;
use bytes::Bytes;
use bytes::BytesMut;

use crate::error::ParseError;
use crate::types::Reply;
use crate::utils::*;

/// Result of a parsing attempt.
#[derive(Debug)]
pub enum ParseOutcome {
	/// A complete reply was parsed.
	Complete(Reply),
	/// The buffer does not contain enough data to parse a complete reply.
	Incomplete,
	/// An error occurred during parsing.
	Error(ParseError),
}

/// A stateful reply parser that supports streaming.
///
/// Nested arrays are tracked on an explicit frame stack, so arbitrarily
/// fragmented input never recurses and never loses progress between
/// calls.
pub struct ReplyParser {
	frames: Vec<Frame>,
}

#[derive(Debug)]
enum Frame {
	Root,
	Array {
		expected: usize,
		elements: Vec<Reply>,
	},
}

impl Default for ReplyParser {
	fn default() -> Self {
		Self::new()
	}
}

// Helper enum for parse_step
enum ParsedItem {
	Value(Reply),
	FramePushed,
}

impl ReplyParser {
	pub fn new() -> Self {
		Self { frames: Vec::new() }
	}

	/// Parse one reply from a mutable BytesMut buffer.
	///
	/// On success, consumes the parsed bytes and returns
	/// `ParseOutcome::Complete(reply)`. Returns `ParseOutcome::Incomplete`
	/// when only a prefix has arrived; append more bytes to `buf` and call
	/// again with the same parser to resume. A malformed stream returns
	/// `ParseOutcome::Error(error)`.
	pub fn parse(&mut self, buf: &mut BytesMut) -> ParseOutcome {
		if self.frames.is_empty() {
			self.frames.push(Frame::Root);
		}

		loop {
			match self.parse_step(buf) {
				Ok(Some(ParsedItem::FramePushed)) => {
					continue;
				}
				Ok(Some(ParsedItem::Value(reply))) => {
					// We got a value, inject it into the current frame
					match self.handle_parsed_value(reply) {
						Ok(Some(final_reply)) => return ParseOutcome::Complete(final_reply),
						Ok(None) => continue,
						Err(e) => return ParseOutcome::Error(e),
					}
				}
				Ok(None) => return ParseOutcome::Incomplete,
				Err(e) => return ParseOutcome::Error(e),
			}
		}
	}

	// Absorb a completed value into the top frame.
	// Returns `Some(reply)` once the root value is finished, `None` while
	// array frames still expect elements.
	fn handle_parsed_value(&mut self, value: Reply) -> Result<Option<Reply>, ParseError> {
		let current_frame_idx = self
			.frames
			.len()
			.checked_sub(1)
			.ok_or_else(|| ParseError::InvalidFormat("Internal stack error".into()))?;

		match &mut self.frames[current_frame_idx] {
			Frame::Root => {
				// Pop so the next call starts clean for the next reply.
				self.frames.pop();
				Ok(Some(value))
			}
			Frame::Array { expected, elements } => {
				elements.push(value);
				*expected -= 1;
				if *expected == 0 {
					let arr = std::mem::take(elements);
					self.frames.pop();
					self.handle_parsed_value(Reply::Array(Some(arr)))
				} else {
					Ok(None)
				}
			}
		}
	}

	/// Tries to parse the next token.
	/// A primitive returns `Ok(Some(ParsedItem::Value(v)))`. An array
	/// header pushes a frame and returns `Ok(Some(ParsedItem::FramePushed))`.
	/// If incomplete, returns `Ok(None)`.
	fn parse_step(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		if buf.is_empty() {
			return Ok(None);
		}

		// Peek type marker
		match buf[0] {
			STATUS => self.parse_status(buf),
			ERROR => self.parse_error(buf),
			INTEGER => self.parse_integer_reply(buf),
			BULK => self.parse_bulk(buf),
			ARRAY => self.start_array(buf),
			other => Err(ParseError::InvalidTypeMarker(other as char)),
		}
	}

	fn parse_status(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		// buf[0] is '+'
		if let Some((line, total_len)) = peek_line(&buf[1..]) {
			let value = Bytes::copy_from_slice(line);
			buf.advance(1 + total_len);
			Ok(Some(ParsedItem::Value(Reply::Status(value))))
		} else {
			Ok(None)
		}
	}

	fn parse_error(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		if let Some((line, total_len)) = peek_line(&buf[1..]) {
			let value = Bytes::copy_from_slice(line);
			buf.advance(1 + total_len);
			Ok(Some(ParsedItem::Value(Reply::Error(value))))
		} else {
			Ok(None)
		}
	}

	fn parse_integer_reply(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		if let Some((line, total_len)) = peek_line(&buf[1..]) {
			let num = parse_integer(line)?;
			buf.advance(1 + total_len);
			Ok(Some(ParsedItem::Value(Reply::Integer(num))))
		} else {
			Ok(None)
		}
	}

	fn parse_bulk(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		// $6\r\nfoobar\r\n
		if let Some((line, len_consumed)) = peek_line(&buf[1..]) {
			let length = parse_integer(line)?;

			if length == -1 {
				buf.advance(1 + len_consumed);
				return Ok(Some(ParsedItem::Value(Reply::Bulk(None))));
			}
			if length < -1 {
				return Err(ParseError::InvalidBulkLength(length));
			}

			let length = length as usize;
			let total_needed = 1 + len_consumed + length + 2; // +2 for CRLF

			if buf.len() < total_needed {
				return Ok(None);
			}

			// All good, consume
			buf.advance(1 + len_consumed);
			let data = buf.split_to(length).freeze();
			if buf.len() < 2 || &buf[0..2] != CRLF {
				return Err(ParseError::InvalidFormat(
					"Missing CRLF after bulk payload".to_string(),
				));
			}
			buf.advance(2);

			Ok(Some(ParsedItem::Value(Reply::Bulk(Some(data)))))
		} else {
			Ok(None)
		}
	}

	fn start_array(&mut self, buf: &mut BytesMut) -> Result<Option<ParsedItem>, ParseError> {
		if let Some((line, total_len)) = peek_line(&buf[1..]) {
			let length = parse_integer(line)?;
			buf.advance(1 + total_len);

			if length == -1 {
				return Ok(Some(ParsedItem::Value(Reply::Array(None))));
			}
			if length < -1 {
				return Err(ParseError::InvalidArrayLength(length));
			}

			let length = length as usize;
			if length == 0 {
				// `*0` is an empty array, distinct from the `*-1` nil.
				return Ok(Some(ParsedItem::Value(Reply::Array(Some(Vec::new())))));
			}

			self.frames.push(Frame::Array {
				expected: length,
				elements: Vec::with_capacity(length),
			});
			Ok(Some(ParsedItem::FramePushed))
		} else {
			Ok(None)
		}
	}
}

/// Convenience function for one-off parsing.
/// This will create a temporary parser and try to parse one reply.
/// If streaming is needed, use `ReplyParser` directly.
pub fn parse(buf: &mut BytesMut) -> Result<Reply, ParseError> {
	let mut parser = ReplyParser::new();
	match parser.parse(buf) {
		ParseOutcome::Complete(reply) => Ok(reply),
		ParseOutcome::Incomplete => Err(ParseError::UnexpectedEof),
		ParseOutcome::Error(e) => Err(e),
	}
}
