//! Error types for the cryptographic core

use std::path::PathBuf;

use crate::types::NONCE_LEN;

/// Errors raised by the primitives and the file wrapper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("No modular inverse exists")]
    NoInverse,

    #[error("Degenerate shared secret")]
    DegenerateSharedSecret,

    #[error("Point is not on the curve")]
    PointNotOnCurve,

    #[error("Plaintext must be smaller than the field prime")]
    PlaintextOutOfRange,

    #[error("Message hash must be smaller than the RSA modulus")]
    MessageTooLarge,

    #[error("Prime size of {bits} bits is too small")]
    InvalidPrimeSize { bits: u64 },

    #[error("Signature verification failed")]
    SignatureMismatch,

    #[error("Encrypted input too short: {len} bytes, IV alone needs {}", NONCE_LEN)]
    TruncatedInput { len: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
