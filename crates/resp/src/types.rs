//! Reply frame representation.

use bytes::Bytes;

/// A single RESP2 reply frame.
///
/// Servers answer with exactly these five shapes. The two nil forms
/// (`$-1`, `*-1`) live inside `Bulk` and `Array` rather than as a
/// standalone variant, so an empty array stays distinct from no array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Status (simple string): `+OK\r\n`
    Status(Bytes),

    /// Error: `-ERR message\r\n`
    Error(Bytes),

    /// Integer: `:1000\r\n`
    Integer(i64),

    /// Bulk string: `$6\r\nfoobar\r\n`, or nil as `$-1\r\n`
    Bulk(Option<Bytes>),

    /// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`, or nil as `*-1\r\n`
    Array(Option<Vec<Reply>>),
}

impl Reply {
    /// Check if the reply is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    /// Check if the reply is one of the two nil forms
    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Bulk(None) | Reply::Array(None))
    }

    /// Try to view the payload as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Status(s) | Reply::Bulk(Some(s)) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    /// Try to view the payload as bytes
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Reply::Status(b) | Reply::Bulk(Some(b)) => Some(b),
            _ => None,
        }
    }

    /// Try to read an integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to view an array reply's elements
    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Reply::Array(Some(elements)) => Some(elements),
            _ => None,
        }
    }

    /// Try to consume an array reply's elements
    pub fn into_array(self) -> Option<Vec<Reply>> {
        match self {
            Reply::Array(Some(elements)) => Some(elements),
            _ => None,
        }
    }

    // Convenience constructors

    /// Create a status reply
    pub fn status(s: impl Into<Bytes>) -> Self {
        Reply::Status(s.into())
    }

    /// Create an error reply
    pub fn error(e: impl Into<Bytes>) -> Self {
        Reply::Error(e.into())
    }

    /// Create a bulk reply
    pub fn bulk(data: impl Into<Bytes>) -> Self {
        Reply::Bulk(Some(data.into()))
    }

    /// Create an array reply from an iterator
    pub fn array(items: impl IntoIterator<Item = Reply>) -> Self {
        Reply::Array(Some(items.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_error() {
        let err = Reply::error("ERR");
        assert!(err.is_error());

        let ok = Reply::status("OK");
        assert!(!ok.is_error());
    }

    #[test]
    fn test_is_nil() {
        assert!(Reply::Bulk(None).is_nil());
        assert!(Reply::Array(None).is_nil());
        assert!(!Reply::bulk("").is_nil());
        assert!(!Reply::array(vec![]).is_nil());
    }

    #[test]
    fn test_as_str() {
        let reply = Reply::status("hello");
        assert_eq!(reply.as_str(), Some("hello"));

        let num = Reply::Integer(42);
        assert_eq!(num.as_str(), None);
    }

    #[test]
    fn test_as_bytes() {
        let reply = Reply::bulk("payload");
        assert_eq!(reply.as_bytes(), Some(&Bytes::from("payload")));

        assert_eq!(Reply::Bulk(None).as_bytes(), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(Reply::Integer(42).as_integer(), Some(42));
        assert_eq!(Reply::status("42").as_integer(), None);
    }

    #[test]
    fn test_as_array() {
        let arr = Reply::array(vec![Reply::Integer(1), Reply::Integer(2)]);
        assert_eq!(arr.as_array().map(|a| a.len()), Some(2));

        assert_eq!(Reply::Array(None).as_array(), None);
    }

    #[test]
    fn test_into_array() {
        let arr = Reply::array(vec![Reply::Integer(1), Reply::Integer(2)]);
        let elements = arr.into_array().unwrap();
        assert_eq!(elements.len(), 2);

        assert_eq!(Reply::Array(None).into_array(), None);
    }
}
