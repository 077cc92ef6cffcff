//! # RESP - Redis Serialization Protocol codec
//!
//! Client-side RESP2 support: a streaming, zero-copy reply parser and the
//! multi-bulk command encoder that feeds it.
//!
//! Replies use exactly five frame types (`+`, `-`, `:`, `$`, `*`), with
//! `$-1` and `*-1` as the two nil forms. Commands always go out as arrays
//! of bulk strings, so arbitrary binary arguments survive verbatim.
//!
//! ## Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use resp::Reply;
//!
//! let mut buf = BytesMut::from(&b"+OK\r\n"[..]);
//! let reply = resp::parse(&mut buf).unwrap();
//! assert_eq!(reply.as_str(), Some("OK"));
//! ```

mod encode;
mod error;
mod parser;
mod types;
mod utils;

pub use encode::put_command;
pub use encode::put_reply;
pub use error::ParseError;
pub use parser::ParseOutcome;
pub use parser::ReplyParser;
pub use parser::parse;
pub use types::Reply;
