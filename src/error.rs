use thiserror::Error;

/// Errors surfaced at the call boundary. Hashing itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The argument list did not hold exactly one value.
    #[error("You must provide exactly one argument.")]
    Arity {
        /// Number of arguments received.
        given: usize,
    },
    /// The single argument was not a byte buffer.
    #[error("Argument should be a buffer object.")]
    Type {
        /// Kind of the value received instead.
        found: &'static str,
    },
    /// A stage name did not match any primitive of the chain.
    #[error("unknown hash stage `{0}`")]
    UnknownStage(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
