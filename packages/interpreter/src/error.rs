use thiserror::Error;

/// Errors that can occur while deriving types from the type graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeriveError {
    #[error("Type nesting exceeds the recursion limit of {limit} (reached depth {depth})")]
    RecursionLimitExceeded { limit: usize, depth: usize },

    #[error("Method '{method}' has a {found} type instead of a signature")]
    BadMethodSignature { method: String, found: String },

    #[error("Unsupported type kind: {kind}")]
    UnsupportedType { kind: String },

    #[error("Type is a {found}, not an interface")]
    NotAnInterface { found: String },
}

pub type DeriveResult<T> = Result<T, DeriveError>;
