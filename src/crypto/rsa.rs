//! RSA key generation, signing and verification

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;
use sha1::{Digest, Sha1};

use super::{bigint_to_minimal_bytes_be, bytes_to_bigint_be, mod_inverse};
use crate::error::{Error, Result};
use crate::types::{DEFAULT_MR_ROUNDS, RSA_PUBLIC_EXPONENT, SMALL_PRIMES};

/// RSA public key `(n, e)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// RSA private key `(n, d)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: BigUint,
    pub d: BigUint,
}

#[derive(Clone, Debug)]
pub struct RsaKeyPair {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

/// Probabilistic primality test: trial division by small primes, then
/// Miller-Rabin with `rounds` random witnesses.
pub fn is_prime<R: Rng + ?Sized>(candidate: &BigUint, rounds: usize, rng: &mut R) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if candidate < &two {
        return false;
    }

    for &small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if (candidate % &small).is_zero() {
            return candidate == &small;
        }
    }

    // Write candidate - 1 as d * 2^s with d odd
    let n_minus_one = candidate - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, candidate);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, candidate);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }

    true
}

/// Sample random `bits`-bit integers until one is prime.
///
/// The top bit is forced so the result has exactly `bits` bits.
pub fn generate_prime<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> Result<BigUint> {
    if bits < 2 {
        return Err(Error::InvalidPrimeSize { bits });
    }

    loop {
        let mut candidate = rng.gen_biguint(bits);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);
        if is_prime(&candidate, DEFAULT_MR_ROUNDS, rng) {
            return Ok(candidate);
        }
    }
}

/// Generate an RSA key pair with a `bits`-bit modulus and `e = 65537`
///
/// Each prime needs at least 3 bits: with the top and low bits forced, 2-bit
/// sampling can only produce 3, so two distinct primes would never be found.
pub fn generate_rsa_keypair<R: Rng + ?Sized>(bits: u64, rng: &mut R) -> Result<RsaKeyPair> {
    if bits / 2 < 3 {
        return Err(Error::InvalidPrimeSize { bits: bits / 2 });
    }

    let one = BigUint::one();
    let e = BigUint::from(RSA_PUBLIC_EXPONENT);

    loop {
        let p = generate_prime(bits / 2, rng)?;
        let q = generate_prime(bits / 2, rng)?;
        if p == q {
            continue;
        }

        let phi = (&p - &one) * (&q - &one);
        let d = match mod_inverse(&e, &phi) {
            Ok(d) => d,
            // e shares a factor with phi; draw new primes
            Err(Error::NoInverse) => continue,
            Err(err) => return Err(err),
        };
        let n = p * q;

        return Ok(RsaKeyPair {
            public: RsaPublicKey {
                n: n.clone(),
                e,
            },
            private: RsaPrivateKey { n, d },
        });
    }
}

/// Sign a message digest: `hash^d mod n`, minimal big-endian encoding
pub fn sign(private_key: &RsaPrivateKey, message_hash: &[u8]) -> Result<Vec<u8>> {
    let hash = bytes_to_bigint_be(message_hash);
    if hash >= private_key.n {
        return Err(Error::MessageTooLarge);
    }

    let signature = hash.modpow(&private_key.d, &private_key.n);
    Ok(bigint_to_minimal_bytes_be(&signature))
}

/// Check `signature^e mod n == hash`
pub fn verify(public_key: &RsaPublicKey, message_hash: &[u8], signature: &[u8]) -> bool {
    let hash = bytes_to_bigint_be(message_hash);
    let signature = bytes_to_bigint_be(signature);
    if signature >= public_key.n {
        return false;
    }

    signature.modpow(&public_key.e, &public_key.n) == hash
}

/// SHA-1 the message and sign the digest
pub fn sign_message(private_key: &RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let digest = Sha1::digest(message);
    sign(private_key, &digest)
}

/// SHA-1 the message and verify the signature over the digest
pub fn verify_message(public_key: &RsaPublicKey, message: &[u8], signature: &[u8]) -> bool {
    let digest = Sha1::digest(message);
    verify(public_key, &digest, signature)
}
