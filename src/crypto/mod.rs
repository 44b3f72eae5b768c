//! Cryptographic operations module

pub mod curve;
pub mod elgamal;
pub mod ofb;
pub mod rsa;
pub mod salsa20;

pub use curve::{Curve, Point};
pub use elgamal::{EcKeyPair, ElGamalCiphertext};
pub use rsa::{RsaKeyPair, RsaPrivateKey, RsaPublicKey};

use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Convert BigUint to big-endian bytes, left-padded with zeros to `length`
pub fn bigint_to_bytes_be(n: &BigUint, length: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    if bytes.len() >= length {
        return bytes;
    }
    let mut out = vec![0u8; length - bytes.len()];
    out.extend_from_slice(&bytes);
    out
}

/// Convert BigUint to its shortest big-endian encoding (zero is empty)
pub fn bigint_to_minimal_bytes_be(n: &BigUint) -> Vec<u8> {
    if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_be()
    }
}

/// Convert big-endian bytes to BigUint
pub fn bytes_to_bigint_be(data: &[u8]) -> BigUint {
    BigUint::from_bytes_be(data)
}

/// Compute `(a - b) mod m` without leaving unsigned arithmetic
pub fn sub_mod(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - b + a
    }
}

/// Calculate modular multiplicative inverse using the iterative Extended Euclidean Algorithm
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::NoInverse);
    }
    let a = a % m;
    if a.is_zero() {
        return Err(Error::NoInverse);
    }

    let modulus = BigInt::from(m.clone());
    let (mut old_r, mut r) = (BigInt::from(a), modulus.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    // old_r now holds gcd(a, m)
    if !old_r.is_one() {
        return Err(Error::NoInverse);
    }

    old_s.mod_floor(&modulus).to_biguint().ok_or(Error::NoInverse)
}
