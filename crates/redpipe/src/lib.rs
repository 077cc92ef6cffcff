//! # redpipe - a blocking bridge to RESP servers
//!
//! Connects an embedding runtime to any server speaking the Redis wire
//! protocol, over TCP or Unix domain sockets. One handle owns one
//! connection; commands run either one at a time with [`Client::execute`]
//! or batched into a single round trip with [`Client::pipeline`].
//!
//! Server error replies surface as errors (or as [`Value::Error`]
//! elements inside a pipeline) and leave the connection usable. Transport
//! failures close the handle, since a half-finished conversation can no
//! longer be trusted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use redpipe::Client;
//! use redpipe::Command;
//!
//! fn main() -> redpipe::Result<()> {
//!     let mut client = Client::connect("127.0.0.1:6379")?;
//!     let pong = client.execute(&Command::new("PING"))?;
//!     assert_eq!(pong.as_str(), Some("PONG"));
//!     client.close();
//!     Ok(())
//! }
//! ```

mod client;
mod command;
mod connection;
mod error;
mod value;

pub use client::Client;
pub use client::OnClosed;
pub use command::Arg;
pub use command::Command;
pub use connection::ConnectOptions;
pub use error::Error;
pub use error::Result;
pub use resp::Reply;
pub use value::ErrorPolicy;
pub use value::Value;
pub use value::decode;
