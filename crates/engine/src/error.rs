//! Port-level error type

use thiserror::Error;

/// Errors reported by the cipher port, the duplex channel and their
/// configuration surface
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation on a port with no attached context
    #[error("port is not open")]
    NotOpen,

    /// Open called while a context is already attached
    #[error("port is already open")]
    AlreadyOpen,

    /// Algorithm identifier not recognized
    #[error("unsupported algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    /// Key length outside the supported set
    #[error("bad key length: {0} bytes")]
    BadKeyLength(usize),

    /// IV length outside the supported set
    #[error("bad IV length: {0} bytes")]
    BadIvLength(usize),

    /// Primitive setup rejected the configured key or IV
    #[error("cipher initialization failed: {0}")]
    CipherInit(String),

    /// Internal block alignment violation. Indicates a bug in the pipeline,
    /// not a user error.
    #[error("block size violation: expected multiple of {expected}, got {actual}")]
    BadBlockSize { expected: usize, actual: usize },

    /// AEAD tag mismatch; no plaintext was produced
    #[error("authentication failed")]
    AuthenticationFailure,

    /// Operation not supported by the current configuration
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<cryptport_primitives::Error> for Error {
    fn from(err: cryptport_primitives::Error) -> Self {
        match err {
            cryptport_primitives::Error::Authentication { .. } => Error::AuthenticationFailure,
            other => Error::CipherInit(other.to_string()),
        }
    }
}
