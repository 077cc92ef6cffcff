//! Encoders for RESP frames: commands on the way out, replies for test doubles.

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::types::Reply;
use crate::utils::ARRAY;
use crate::utils::BULK;
use crate::utils::CRLF;
use crate::utils::ERROR;
use crate::utils::INTEGER;
use crate::utils::STATUS;

/// Encode a command as a multi-bulk request frame.
///
/// Every argument is written as a bulk string, so arbitrary binary
/// payloads survive verbatim. Argument shape is the caller's problem;
/// encoding itself cannot fail.
pub fn put_command(args: &[Bytes], buf: &mut BytesMut) {
	put_length(buf, ARRAY, args.len());
	for arg in args {
		put_bulk(buf, arg);
	}
}

/// Encode a reply frame.
///
/// The client never sends replies itself; this is the serializer mock
/// servers and fixtures use to script wire traffic.
pub fn put_reply(reply: &Reply, buf: &mut BytesMut) {
	match reply {
		Reply::Status(s) => put_status(buf, s),
		Reply::Error(e) => put_error(buf, e),
		Reply::Integer(i) => put_integer(buf, *i),
		Reply::Bulk(Some(data)) => put_bulk(buf, data),
		Reply::Bulk(None) => put_nil(buf, BULK),
		Reply::Array(Some(elements)) => {
			put_length(buf, ARRAY, elements.len());
			for element in elements {
				put_reply(element, buf);
			}
		}
		Reply::Array(None) => put_nil(buf, ARRAY),
	}
}

#[inline]
fn put_status(buf: &mut BytesMut, s: &Bytes) {
	buf.put_u8(STATUS);
	buf.put_slice(s);
	buf.put_slice(CRLF);
}

#[inline]
fn put_error(buf: &mut BytesMut, e: &Bytes) {
	buf.put_u8(ERROR);
	buf.put_slice(e);
	buf.put_slice(CRLF);
}

#[inline]
fn put_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn put_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn put_bulk(buf: &mut BytesMut, data: &Bytes) {
	put_length(buf, BULK, data.len());
	buf.put_slice(data);
	buf.put_slice(CRLF);
}

#[inline]
fn put_nil(buf: &mut BytesMut, marker: u8) {
	buf.put_u8(marker);
	buf.put_slice(b"-1");
	buf.put_slice(CRLF);
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn encode_command(args: &[Bytes]) -> Bytes {
		let mut buf = BytesMut::new();
		put_command(args, &mut buf);
		buf.freeze()
	}

	fn encode_reply(reply: &Reply) -> Bytes {
		let mut buf = BytesMut::new();
		put_reply(reply, &mut buf);
		buf.freeze()
	}

	#[test]
	fn test_put_command_ping() {
		let encoded = encode_command(&[Bytes::from_static(b"PING")]);
		assert_eq!(encoded, b"*1\r\n$4\r\nPING\r\n".as_slice());
	}

	#[test]
	fn test_put_command_set() {
		let encoded = encode_command(&[
			Bytes::from_static(b"SET"),
			Bytes::from_static(b"key"),
			Bytes::from_static(b"value"),
		]);
		assert_eq!(
			encoded,
			b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\nvalue\r\n".as_slice()
		);
	}

	#[test]
	fn test_put_command_binary_argument() {
		let encoded = encode_command(&[
			Bytes::from_static(b"SET"),
			Bytes::from_static(b"key"),
			Bytes::from_static(b"\x00\x01\r\n\x02"),
		]);
		assert_eq!(
			encoded,
			b"*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$5\r\n\x00\x01\r\n\x02\r\n".as_slice()
		);
	}

	#[test]
	fn test_put_reply_status() {
		let encoded = encode_reply(&Reply::Status(Bytes::from_static(b"OK")));
		assert_eq!(encoded, b"+OK\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_error() {
		let encoded = encode_reply(&Reply::Error(Bytes::from_static(b"ERR")));
		assert_eq!(encoded, b"-ERR\r\n".as_slice());
	}

	#[rstest]
	#[case(100, b":100\r\n")]
	#[case(-100, b":-100\r\n")]
	#[case(0, b":0\r\n")]
	fn test_put_reply_integer(#[case] input: i64, #[case] expected: &[u8]) {
		let encoded = encode_reply(&Reply::Integer(input));
		assert_eq!(encoded, expected);
	}

	#[test]
	fn test_put_reply_bulk() {
		let encoded = encode_reply(&Reply::Bulk(Some(Bytes::from_static(b"hello"))));
		assert_eq!(encoded, b"$5\r\nhello\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_empty_bulk() {
		let encoded = encode_reply(&Reply::Bulk(Some(Bytes::new())));
		assert_eq!(encoded, b"$0\r\n\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_nil_bulk() {
		let encoded = encode_reply(&Reply::Bulk(None));
		assert_eq!(encoded, b"$-1\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_nil_array() {
		let encoded = encode_reply(&Reply::Array(None));
		assert_eq!(encoded, b"*-1\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_empty_array() {
		let encoded = encode_reply(&Reply::Array(Some(vec![])));
		assert_eq!(encoded, b"*0\r\n".as_slice());
	}

	#[test]
	fn test_put_reply_nested_array() {
		let reply = Reply::Array(Some(vec![
			Reply::Status(Bytes::from_static(b"OK")),
			Reply::Integer(42),
			Reply::Array(Some(vec![Reply::Bulk(Some(Bytes::from_static(b"x")))])),
		]));
		let encoded = encode_reply(&reply);
		assert_eq!(encoded, b"*3\r\n+OK\r\n:42\r\n*1\r\n$1\r\nx\r\n".as_slice());
	}
}
