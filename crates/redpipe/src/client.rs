//! The connection handle handed to the embedding runtime.

#[cfg(unix)]
use std::path::Path;

use log::debug;
use log::warn;
use resp::Reply;

use crate::command::Command;
use crate::connection::ConnectOptions;
use crate::connection::Connection;
use crate::error::Error;
use crate::error::Result;
use crate::value::ErrorPolicy;
use crate::value::Value;
use crate::value::decode;

/// What to do when an operation finds the handle already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnClosed {
	/// Fail with `Error::ConnectionClosed`
	Raise,
	/// Log a warning and report the handle as closed
	Warn,
	/// Report the handle as closed, silently
	Ignore,
}

/// A blocking client holding at most one connection.
///
/// The handle closes on three paths: an explicit [`Client::close`],
/// being dropped, or a transport failure mid-operation. After any of
/// them every operation fails with [`Error::ConnectionClosed`] until a
/// new handle is connected. Server error replies do not close the
/// handle; the conversation stays in sync and the next command works.
pub struct Client {
	conn: Option<Connection>,
}

impl Client {
	/// Connect over TCP with default options.
	pub fn connect(addr: &str) -> Result<Self> {
		Self::connect_with(addr, &ConnectOptions::default())
	}

	/// Connect over TCP with explicit socket options.
	pub fn connect_with(addr: &str, options: &ConnectOptions) -> Result<Self> {
		let conn = Connection::connect_tcp(addr, options)?;
		Ok(Self { conn: Some(conn) })
	}

	/// Connect over a Unix domain socket with default options.
	#[cfg(unix)]
	pub fn connect_unix(path: impl AsRef<Path>) -> Result<Self> {
		Self::connect_unix_with(path, &ConnectOptions::default())
	}

	/// Connect over a Unix domain socket with explicit socket options.
	#[cfg(unix)]
	pub fn connect_unix_with(path: impl AsRef<Path>, options: &ConnectOptions) -> Result<Self> {
		let conn = Connection::connect_unix(path.as_ref(), options)?;
		Ok(Self { conn: Some(conn) })
	}

	/// Whether the handle still owns a live connection.
	pub fn is_open(&self) -> bool {
		self.conn.is_some()
	}

	/// Validate the handle under the given policy.
	///
	/// Returns `Ok(true)` when open. On a closed handle,
	/// `OnClosed::Raise` fails, `OnClosed::Warn` logs and returns
	/// `Ok(false)`, and `OnClosed::Ignore` just returns `Ok(false)`.
	pub fn ensure_open(&mut self, on_closed: OnClosed) -> Result<bool> {
		Ok(self.connection(on_closed)?.is_some())
	}

	fn connection(&mut self, on_closed: OnClosed) -> Result<Option<&mut Connection>> {
		if self.conn.is_none() {
			match on_closed {
				OnClosed::Raise => return Err(Error::ConnectionClosed),
				OnClosed::Warn => warn!("Connection handle is closed"),
				OnClosed::Ignore => {}
			}
			return Ok(None);
		}
		Ok(self.conn.as_mut())
	}

	/// Execute one command in one round trip and decode the reply.
	///
	/// An error reply from the server surfaces as [`Error::Reply`] and
	/// leaves the handle open.
	pub fn execute(&mut self, command: &Command) -> Result<Value> {
		let Some(conn) = self.connection(OnClosed::Raise)? else {
			return Err(Error::ConnectionClosed);
		};
		command.check()?;
		let outcome = conn.round_trip(command);
		let reply = self.check_transport(outcome)?;
		decode(reply, ErrorPolicy::Raise)
	}

	/// Execute a batch in one round trip, replies in command order.
	///
	/// Every command is validated before anything is written, so a bad
	/// batch sends no bytes at all. Error replies come back as
	/// [`Value::Error`] elements rather than failing the batch; position
	/// `i` of the result always answers command `i`.
	pub fn pipeline(&mut self, commands: &[Command]) -> Result<Vec<Value>> {
		let Some(conn) = self.connection(OnClosed::Raise)? else {
			return Err(Error::ConnectionClosed);
		};
		for command in commands {
			command.check()?;
		}
		if commands.is_empty() {
			return Ok(Vec::new());
		}
		let outcome = Self::pipeline_replies(conn, commands);
		let replies = self.check_transport(outcome)?;
		let mut values = Vec::with_capacity(replies.len());
		for reply in replies {
			values.push(decode(reply, ErrorPolicy::Preserve)?);
		}
		Ok(values)
	}

	fn pipeline_replies(conn: &mut Connection, commands: &[Command]) -> Result<Vec<Reply>> {
		for command in commands {
			conn.stage(command);
		}
		conn.flush_staged()?;
		let mut replies = Vec::with_capacity(commands.len());
		for _ in 0..commands.len() {
			replies.push(conn.read_reply()?);
		}
		Ok(replies)
	}

	/// Drop the connection on any transport failure. Once a read or
	/// write fails partway, the reply stream can no longer be trusted
	/// to line up with requests.
	fn check_transport<T>(&mut self, outcome: Result<T>) -> Result<T> {
		if let Err(e) = &outcome {
			debug!("Dropping connection after transport failure: {e}");
			self.conn = None;
		}
		outcome
	}

	/// Release the connection. Safe to call more than once; later calls
	/// do nothing.
	pub fn close(&mut self) {
		if let Some(conn) = self.conn.take() {
			debug!("Closing connection to {}", conn.peer());
		}
	}
}

impl Drop for Client {
	fn drop(&mut self) {
		self.close();
	}
}
