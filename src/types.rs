//! Common types and constants

use num_bigint::BigUint;

/// Salsa20 key length in bytes
pub const KEY_LEN: usize = 32;

/// Salsa20 nonce / OFB IV length in bytes
pub const NONCE_LEN: usize = 8;

/// Salsa20 block length in bytes
pub const BLOCK_LEN: usize = 64;

/// Number of scalar bits scanned by double-and-add
pub const SCALAR_BITS: u64 = 256;

/// Fixed RSA public exponent
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// Default RSA modulus size in bits
pub const DEFAULT_RSA_BITS: u64 = 2048;

/// Default number of Miller-Rabin witnesses
pub const DEFAULT_MR_ROUNDS: usize = 5;

/// Small primes used for trial division before Miller-Rabin
pub const SMALL_PRIMES: &[u32] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Content written when the CLI has to bootstrap its input file
pub const SAMPLE_PLAINTEXT: &str = "This is a test file for encryption and decryption.";

/// NIST P-256 domain parameters
#[derive(Clone)]
pub struct P256;

impl P256 {
    pub fn p() -> BigUint {
        hex_constant("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff")
    }

    pub fn a() -> BigUint {
        hex_constant("ffffffff00000001000000000000000000000000fffffffffffffffffffffffc")
    }

    pub fn b() -> BigUint {
        hex_constant("5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b")
    }

    pub fn gx() -> BigUint {
        hex_constant("6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296")
    }

    pub fn gy() -> BigUint {
        hex_constant("4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5")
    }

    pub fn n() -> BigUint {
        hex_constant("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
    }
}

fn hex_constant(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
}
