use bytes::BytesMut;
use resp::ParseOutcome;
use resp::ReplyParser;

fn main() {
	println!("--- RESP Streaming Parse Example ---");

	// Simulate a TCP stream with fragmented reply data
	// The server is sending:
	// - A Status: "+OK\r\n"
	// - An Integer: ":1000\r\n"
	// - An Array: "*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n"
	// - But split into random chunks.
	let data_chunks = vec![
		b"+O".as_slice(),
		b"K\r\n:1".as_slice(),
		b"00".as_slice(),
		b"0\r\n*2\r\n$3\r\nfo".as_slice(),
		b"o\r\n$3\r\nb".as_slice(),
		b"ar\r\n".as_slice(),
	];

	let mut parser = ReplyParser::new();
	let mut buffer = BytesMut::new();

	for (i, chunk) in data_chunks.iter().enumerate() {
		println!(
			"\n[Stream] Received Chunk {}: {:?}",
			i,
			std::str::from_utf8(chunk).unwrap()
		);

		buffer.extend_from_slice(chunk);

		loop {
			// Attempt to parse
			match parser.parse(&mut buffer) {
				ParseOutcome::Complete(reply) => {
					println!("[Parser] Complete: {:?}", reply);
					// Continue loop to see if there are more complete frames in
					// the buffer
				}
				ParseOutcome::Incomplete => {
					println!("[Parser] Incomplete, waiting for more data...");
					break;
				}
				ParseOutcome::Error(e) => {
					eprintln!("[Parser] Error: {:?}", e);
					break;
				}
			}
		}
	}
}
