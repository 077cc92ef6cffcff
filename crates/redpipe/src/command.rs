//! Command construction and shape validation.

use bytes::Bytes;
use bytes::BytesMut;

use crate::error::Error;

/// A single command argument, always carried as raw bytes.
///
/// Scalar host values convert losslessly: strings and byte strings pass
/// through, integers and floats render as decimal text, and booleans
/// render as `1`/`0`. Composite values have no conversion on purpose;
/// flatten them into separate arguments instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(Bytes);

impl Arg {
    /// View the raw bytes of this argument.
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg(Bytes::from(s.to_string()))
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg(Bytes::from(s))
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Arg {
    fn from(v: Vec<u8>) -> Self {
        Arg(Bytes::from(v))
    }
}

impl From<Bytes> for Arg {
    fn from(b: Bytes) -> Self {
        Arg(b)
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<u32> for Arg {
    fn from(i: u32) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<u64> for Arg {
    fn from(i: u64) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        Arg(Bytes::from(i.to_string()))
    }
}

impl From<f64> for Arg {
    fn from(d: f64) -> Self {
        Arg(Bytes::from(d.to_string()))
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Arg(Bytes::from_static(if b { b"1" } else { b"0" }))
    }
}

/// A command ready for the wire: its name followed by arguments, each a
/// byte string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    args: Vec<Bytes>,
}

impl Command {
    /// Start a command from its name.
    pub fn new(name: impl Into<Arg>) -> Self {
        Command {
            args: vec![name.into().into_bytes()],
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into().into_bytes());
        self
    }

    /// Build a command from a full argument vector, name first.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        Command {
            args: args.into_iter().map(|a| a.into().into_bytes()).collect(),
        }
    }

    /// Number of arguments, including the command name.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Validate command shape before any bytes hit the wire.
    ///
    /// A command must carry at least its name, and the name must be a
    /// non-empty byte string. Argument values may be any bytes, empty
    /// included (`SET key ""` is a legal request).
    pub fn check(&self) -> Result<(), Error> {
        if self.args.is_empty() {
            return Err(Error::InvalidCommand("empty command".to_string()));
        }
        if self.args[0].is_empty() {
            return Err(Error::InvalidCommand("command name is empty".to_string()));
        }
        Ok(())
    }

    /// Encode as a multi-bulk request frame. Callers run `check` first.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        resp::put_command(&self.args, buf);
    }
}
