//! Blocking transport over TCP or Unix domain sockets.

use std::io;
use std::io::Read;
use std::io::Write;
use std::net::TcpStream;
use std::net::ToSocketAddrs;
#[cfg(unix)]
use std::os::unix::net::UnixStream;
#[cfg(unix)]
use std::path::Path;
use std::time::Duration;

use bytes::BytesMut;
use log::debug;
use log::trace;
use resp::ParseOutcome;
use resp::Reply;
use resp::ReplyParser;

use crate::command::Command;
use crate::error::Error;
use crate::error::Result;

const READ_CHUNK_SIZE: usize = 4096;

/// Socket tuning applied while connecting.
#[derive(Debug, Clone)]
pub struct ConnectOptions {
	/// Bound on establishing the TCP connection. `None` blocks until
	/// the OS gives up.
	pub connect_timeout: Option<Duration>,
	/// Bound on each read syscall while waiting for a reply.
	pub read_timeout: Option<Duration>,
	/// Bound on each write syscall while sending requests.
	pub write_timeout: Option<Duration>,
	/// Disable Nagle's algorithm. Request/reply traffic wants this on.
	pub nodelay: bool,
}

impl Default for ConnectOptions {
	fn default() -> Self {
		Self {
			connect_timeout: None,
			read_timeout: None,
			write_timeout: None,
			nodelay: true,
		}
	}
}

enum Transport {
	Tcp(TcpStream),
	#[cfg(unix)]
	Unix(UnixStream),
}

impl Read for Transport {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		match self {
			Transport::Tcp(stream) => stream.read(buf),
			#[cfg(unix)]
			Transport::Unix(stream) => stream.read(buf),
		}
	}
}

impl Write for Transport {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		match self {
			Transport::Tcp(stream) => stream.write(buf),
			#[cfg(unix)]
			Transport::Unix(stream) => stream.write(buf),
		}
	}

	fn flush(&mut self) -> io::Result<()> {
		match self {
			Transport::Tcp(stream) => stream.flush(),
			#[cfg(unix)]
			Transport::Unix(stream) => stream.flush(),
		}
	}
}

/// One live connection to a server.
///
/// Owns the socket, a staging buffer for outgoing requests, and the
/// reply parser with its read buffer. Leftover bytes from a previous
/// read stay in the buffer, so back-to-back replies from one read
/// syscall are handed out one at a time.
pub(crate) struct Connection {
	transport: Transport,
	parser: ReplyParser,
	read_buf: BytesMut,
	write_buf: BytesMut,
	peer: String,
}

impl Connection {
	pub(crate) fn connect_tcp(addr: &str, options: &ConnectOptions) -> Result<Self> {
		let stream = tcp_stream(addr, options).map_err(|source| Error::Connect {
			addr: addr.to_string(),
			source,
		})?;
		let peer = format!("redis://{addr}");
		debug!("Connected to {peer}");
		Ok(Self::new(Transport::Tcp(stream), peer))
	}

	#[cfg(unix)]
	pub(crate) fn connect_unix(path: &Path, options: &ConnectOptions) -> Result<Self> {
		let stream = unix_stream(path, options).map_err(|source| Error::Connect {
			addr: path.display().to_string(),
			source,
		})?;
		let peer = format!("unix://{}", path.display());
		debug!("Connected to {peer}");
		Ok(Self::new(Transport::Unix(stream), peer))
	}

	fn new(transport: Transport, peer: String) -> Self {
		Self {
			transport,
			parser: ReplyParser::new(),
			read_buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
			write_buf: BytesMut::new(),
			peer,
		}
	}

	pub(crate) fn peer(&self) -> &str {
		&self.peer
	}

	/// Append one encoded command to the staging buffer without sending.
	pub(crate) fn stage(&mut self, command: &Command) {
		command.encode_into(&mut self.write_buf);
	}

	/// Send everything staged so far in one write.
	pub(crate) fn flush_staged(&mut self) -> Result<()> {
		if self.write_buf.is_empty() {
			return Ok(());
		}
		let n = self.write_buf.len();
		self.transport.write_all(&self.write_buf)?;
		self.transport.flush()?;
		self.write_buf.clear();
		trace!("{}: wrote {} request bytes", self.peer, n);
		Ok(())
	}

	/// Block until one complete reply is parsed off the socket.
	pub(crate) fn read_reply(&mut self) -> Result<Reply> {
		loop {
			match self.parser.parse(&mut self.read_buf) {
				ParseOutcome::Complete(reply) => return Ok(reply),
				ParseOutcome::Incomplete => {
					let mut chunk = [0u8; READ_CHUNK_SIZE];
					let n = self.transport.read(&mut chunk)?;
					if n == 0 {
						return Err(Error::Disconnected);
					}
					trace!("{}: read {} reply bytes", self.peer, n);
					self.read_buf.extend_from_slice(&chunk[..n]);
				}
				ParseOutcome::Error(e) => return Err(Error::Protocol(e)),
			}
		}
	}

	/// One request, one reply.
	pub(crate) fn round_trip(&mut self, command: &Command) -> Result<Reply> {
		self.stage(command);
		self.flush_staged()?;
		self.read_reply()
	}
}

fn tcp_stream(addr: &str, options: &ConnectOptions) -> io::Result<TcpStream> {
	let stream = match options.connect_timeout {
		Some(timeout) => {
			let mut last_err = None;
			let mut connected = None;
			for candidate in addr.to_socket_addrs()? {
				match TcpStream::connect_timeout(&candidate, timeout) {
					Ok(stream) => {
						connected = Some(stream);
						break;
					}
					Err(e) => last_err = Some(e),
				}
			}
			match connected {
				Some(stream) => stream,
				None => {
					return Err(last_err.unwrap_or_else(|| {
						io::Error::new(
							io::ErrorKind::AddrNotAvailable,
							"address resolved to nothing",
						)
					}));
				}
			}
		}
		None => TcpStream::connect(addr)?,
	};
	stream.set_nodelay(options.nodelay)?;
	stream.set_read_timeout(options.read_timeout)?;
	stream.set_write_timeout(options.write_timeout)?;
	Ok(stream)
}

#[cfg(unix)]
fn unix_stream(path: &Path, options: &ConnectOptions) -> io::Result<UnixStream> {
	let stream = UnixStream::connect(path)?;
	stream.set_read_timeout(options.read_timeout)?;
	stream.set_write_timeout(options.write_timeout)?;
	Ok(stream)
}
