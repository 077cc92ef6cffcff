use bytes::Bytes;
use bytes::BytesMut;
use resp::ParseError;
use resp::ParseOutcome;
use resp::Reply;
use resp::ReplyParser;

#[test]
fn test_one_shot_parse_incomplete() {
	let mut buf = BytesMut::new();
	buf.extend_from_slice(b"+PON");

	// One-shot parse reports insufficient data as an error
	let result = resp::parse(&mut buf);
	assert!(matches!(result, Err(ParseError::UnexpectedEof)));

	// Try again with full data
	buf.extend_from_slice(b"G\r\n");
	let result = resp::parse(&mut buf);
	match result {
		Ok(Reply::Status(s)) => assert_eq!(s, "PONG"),
		_ => panic!("Expected Status(PONG), got {:?}", result),
	}
}

#[test]
fn test_streaming_parse_resumes() {
	let mut parser = ReplyParser::new();
	let mut buf = BytesMut::new();

	// Partial write
	buf.extend_from_slice(b"+PON");
	let result = parser.parse(&mut buf);
	assert!(matches!(result, ParseOutcome::Incomplete));

	// Buffer should still contain "+PON" because a partial line is never consumed
	assert_eq!(&buf[..], b"+PON");

	// Complete the write
	buf.extend_from_slice(b"G\r\n");
	let result = parser.parse(&mut buf);
	if let ParseOutcome::Complete(Reply::Status(s)) = result {
		assert_eq!(s, "PONG");
	} else {
		panic!("Expected Complete(Status), got {:?}", result);
	}
}

#[test]
fn test_streaming_array_split() {
	let mut parser = ReplyParser::new();
	let mut buf = BytesMut::new();

	// *2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n

	// Write header *2\r\n
	buf.extend_from_slice(b"*2\r\n");
	// Write first element partial $3\r\nf
	buf.extend_from_slice(b"$3\r\nf");

	let result = parser.parse(&mut buf);
	assert!(matches!(result, ParseOutcome::Incomplete));

	// Write rest of first element oo\r\n
	buf.extend_from_slice(b"oo\r\n");

	let result = parser.parse(&mut buf);
	// Still incomplete because we need the second element
	assert!(matches!(result, ParseOutcome::Incomplete));

	// Finish array
	buf.extend_from_slice(b"$3\r\nbar\r\n");

	let result = parser.parse(&mut buf);
	if let ParseOutcome::Complete(Reply::Array(Some(arr))) = result {
		assert_eq!(arr.len(), 2);
		assert_eq!(arr[0], Reply::Bulk(Some(Bytes::from("foo"))));
		assert_eq!(arr[1], Reply::Bulk(Some(Bytes::from("bar"))));
	} else {
		panic!("Expected Complete(Array), got {:?}", result);
	}
}

#[test]
fn test_streaming_back_to_back_replies() {
	let mut parser = ReplyParser::new();
	let mut buf = BytesMut::new();

	// Three pipelined replies arriving in a single read
	buf.extend_from_slice(b"+OK\r\n:2\r\n$-1\r\n");

	let mut replies = Vec::new();
	loop {
		match parser.parse(&mut buf) {
			ParseOutcome::Complete(reply) => replies.push(reply),
			ParseOutcome::Incomplete => break,
			ParseOutcome::Error(e) => panic!("Unexpected parse error: {:?}", e),
		}
	}

	assert_eq!(
		replies,
		vec![
			Reply::Status(Bytes::from("OK")),
			Reply::Integer(2),
			Reply::Bulk(None),
		]
	);
}

#[test]
fn test_streaming_nil_bulk_split_at_sign() {
	let mut parser = ReplyParser::new();
	let mut buf = BytesMut::new();

	// `$-1\r\n` fragmented right after the marker
	buf.extend_from_slice(b"$-");
	assert!(matches!(parser.parse(&mut buf), ParseOutcome::Incomplete));

	buf.extend_from_slice(b"1\r\n");
	let result = parser.parse(&mut buf);
	if let ParseOutcome::Complete(reply) = result {
		assert_eq!(reply, Reply::Bulk(None));
	} else {
		panic!("Expected Complete(Bulk(None)), got {:?}", result);
	}
}

#[test]
fn test_streaming_error_reply() {
	let mut parser = ReplyParser::new();
	let mut buf = BytesMut::new();

	buf.extend_from_slice(b"-WRONGTYPE Operation against a key holding the wrong kind of value\r\n");

	let result = parser.parse(&mut buf);
	if let ParseOutcome::Complete(Reply::Error(msg)) = result {
		assert!(msg.starts_with(b"WRONGTYPE"));
	} else {
		panic!("Expected Complete(Error), got {:?}", result);
	}
}
