use log::debug;

use crate::{
    chain::{self, FinalDigest, Stage, StageState},
    error::{Error, Result},
};

/// A dynamically-typed argument, as handed over by a scripting host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw bytes; the only accepted argument.
    Buffer(Vec<u8>),
    /// Text.
    String(String),
    /// A number.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// An explicit null.
    Null,
    /// A missing value.
    Undefined,
}

impl Value {
    /// Name of the value's kind, used in error reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Buffer(_) => "buffer",
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Undefined => "undefined",
        }
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Buffer(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Buffer(bytes.to_vec())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Validates the argument list and returns the X11 digest of its single buffer.
///
/// Fails with [`Error::Arity`] unless exactly one argument is given, and with
/// [`Error::Type`] when that argument is not a buffer. No hashing happens on failure.
pub fn digest(args: &[Value]) -> Result<FinalDigest> {
    digest_with(args, |_, _| {})
}

/// Like [`digest`], reporting each stage output to `observer`.
pub fn digest_with<F>(args: &[Value], observer: F) -> Result<FinalDigest>
where
    F: FnMut(Stage, &StageState),
{
    let arg = match args {
        [arg] => arg,
        _ => {
            debug!("rejected call with {} arguments", args.len());
            return Err(Error::Arity { given: args.len() });
        }
    };

    match arg {
        Value::Buffer(bytes) => Ok(chain::digest_with(bytes, observer)),
        other => {
            debug!("rejected {} argument", other.kind());
            Err(Error::Type { found: other.kind() })
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn arity() {
        let err = digest(&[]).unwrap_err();
        assert_eq!(err, Error::Arity { given: 0 });
        assert_eq!(err.to_string(), "You must provide exactly one argument.");

        let two = [Value::from(&b"a"[..]), Value::from(&b"b"[..])];
        assert_eq!(digest(&two), Err(Error::Arity { given: 2 }));
    }

    #[test]
    fn argument_type() {
        let err = digest(&[Value::from("0123456789")]).unwrap_err();
        assert_eq!(err, Error::Type { found: "string" });
        assert_eq!(err.to_string(), "Argument should be a buffer object.");

        for value in [Value::Number(1.0), Value::Bool(true), Value::Null, Value::Undefined] {
            assert!(matches!(digest(&[value]), Err(Error::Type { .. })));
        }
    }

    #[test]
    fn buffer() {
        let input = "0123456789".repeat(8).into_bytes();
        let out = digest(&[Value::from(input)]).unwrap();
        assert_eq!(
            hex::encode(out),
            "0fe0c9bd25d85c203e95412ff6d23e1982411be1d95ea9679f90b2f0a28fb13b"
        );
    }
}
