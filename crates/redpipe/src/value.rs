//! Host-side reply values and the decoding policy.

use bytes::Bytes;
use resp::Reply;

use crate::error::Error;

/// What to do with an error reply met while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Turn the error reply into `Error::Reply`.
    Raise,
    /// Keep the error as `Value::Error` so surrounding replies survive.
    Preserve,
}

/// A decoded reply as the embedding runtime sees it.
///
/// Status lines and error lines stay labeled instead of collapsing into
/// plain strings, so `SET` returning `OK` is distinguishable from a
/// bulk payload that happens to contain `OK`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Either nil form on the wire (`$-1` or `*-1`)
    Nil,
    /// Status line such as `OK` or `PONG`
    Status(String),
    /// Bulk payload, verbatim bytes
    Bytes(Bytes),
    /// Integer reply
    Int(i64),
    /// Array of decoded elements
    Array(Vec<Value>),
    /// An error reply preserved as a value (`ErrorPolicy::Preserve`)
    Error(String),
}

impl Value {
    /// Check if the value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if the value is a preserved error reply
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Try to view the payload as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Status(s) => Some(s.as_str()),
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Try to view the payload as bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to read an integer value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view an array value's elements
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// Try to consume an array value's elements
    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }
}

/// Decode one reply under the given error policy.
///
/// Status and error lines become owned strings (non-UTF-8 content is
/// replaced lossily; servers emit ASCII here). Bulk payloads stay raw
/// bytes. Arrays decode recursively under the same policy, so one error
/// element fails the whole reply under `ErrorPolicy::Raise`.
pub fn decode(reply: Reply, policy: ErrorPolicy) -> Result<Value, Error> {
    match reply {
        Reply::Status(s) => Ok(Value::Status(String::from_utf8_lossy(&s).into_owned())),
        Reply::Error(e) => {
            let message = String::from_utf8_lossy(&e).into_owned();
            match policy {
                ErrorPolicy::Raise => Err(Error::Reply(message)),
                ErrorPolicy::Preserve => Ok(Value::Error(message)),
            }
        }
        Reply::Integer(i) => Ok(Value::Int(i)),
        Reply::Bulk(Some(data)) => Ok(Value::Bytes(data)),
        Reply::Bulk(None) => Ok(Value::Nil),
        Reply::Array(Some(elements)) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(decode(element, policy)?);
            }
            Ok(Value::Array(values))
        }
        Reply::Array(None) => Ok(Value::Nil),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_decode_status() {
        let value = decode(Reply::status("OK"), ErrorPolicy::Raise).unwrap();
        assert_eq!(value, Value::Status("OK".to_string()));
        assert_eq!(value.as_str(), Some("OK"));
    }

    #[test]
    fn test_decode_integer() {
        let value = decode(Reply::Integer(-3), ErrorPolicy::Raise).unwrap();
        assert_eq!(value.as_int(), Some(-3));
    }

    #[test]
    fn test_decode_bulk_keeps_bytes() {
        let value = decode(Reply::bulk("payload"), ErrorPolicy::Raise).unwrap();
        assert_eq!(value.as_bytes(), Some(&Bytes::from("payload")));
    }

    #[rstest]
    #[case(Reply::Bulk(None))]
    #[case(Reply::Array(None))]
    fn test_decode_nil_forms(#[case] reply: Reply) {
        let value = decode(reply, ErrorPolicy::Raise).unwrap();
        assert!(value.is_nil());
    }

    #[test]
    fn test_decode_empty_array_is_not_nil() {
        let value = decode(Reply::array(vec![]), ErrorPolicy::Raise).unwrap();
        assert_eq!(value, Value::Array(Vec::new()));
        assert!(!value.is_nil());
    }

    #[test]
    fn test_decode_error_raise() {
        let result = decode(Reply::error("ERR boom"), ErrorPolicy::Raise);
        match result {
            Err(Error::Reply(message)) => assert_eq!(message, "ERR boom"),
            other => panic!("Expected Error::Reply, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_preserve() {
        let value = decode(Reply::error("ERR boom"), ErrorPolicy::Preserve).unwrap();
        assert_eq!(value, Value::Error("ERR boom".to_string()));
        assert!(value.is_error());
    }

    #[test]
    fn test_decode_nested_array() {
        let reply = Reply::array(vec![
            Reply::status("OK"),
            Reply::array(vec![Reply::Integer(1), Reply::Bulk(None)]),
        ]);
        let value = decode(reply, ErrorPolicy::Raise).unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Status("OK".to_string()),
                Value::Array(vec![Value::Int(1), Value::Nil]),
            ])
        );
    }

    #[test]
    fn test_decode_nested_error_follows_policy() {
        let reply = Reply::array(vec![Reply::Integer(1), Reply::error("ERR inner")]);

        let raised = decode(reply.clone(), ErrorPolicy::Raise);
        assert!(matches!(raised, Err(Error::Reply(_))));

        let preserved = decode(reply, ErrorPolicy::Preserve).unwrap();
        assert_eq!(
            preserved,
            Value::Array(vec![Value::Int(1), Value::Error("ERR inner".to_string())])
        );
    }
}
