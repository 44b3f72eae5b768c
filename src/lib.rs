//! HybridCrypt - hybrid file encryption from first principles
//!
//! - [`crypto::curve`] / [`crypto::elgamal`]: P-256 group arithmetic and EC-ElGamal key transport
//! - [`crypto::rsa`]: Miller-Rabin prime generation, RSA signatures
//! - [`crypto::salsa20`] / [`crypto::ofb`]: Salsa20 keystream, OFB chaining and the file wrapper
//! - [`exchange`]: the sender/receiver workflow combining the three
//!
//! Reference-grade code: no constant-time guarantees, no padding schemes.

pub mod crypto;
pub mod error;
pub mod exchange;
pub mod types;

pub use error::{Error, Result};
