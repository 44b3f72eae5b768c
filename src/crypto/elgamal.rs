//! EC-ElGamal encryption of integer payloads

use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use super::curve::{Curve, Point};
use super::mod_inverse;
use crate::error::{Error, Result};

/// EC key pair; `public_key = private_key * G`
#[derive(Clone, Debug)]
pub struct EcKeyPair {
    pub private_key: BigUint,
    pub public_key: Point,
}

/// ElGamal ciphertext: ephemeral point `c1 = k*G` and masked payload `c2`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElGamalCiphertext {
    pub c1: Point,
    pub c2: BigUint,
}

/// Draw a scalar uniformly from `[1, n-1]`
fn random_scalar<R: Rng + ?Sized>(curve: &Curve, rng: &mut R) -> BigUint {
    rng.gen_biguint_range(&BigUint::one(), curve.n())
}

/// x coordinate of a shared secret, rejecting values that cannot mask a payload
fn shared_x(shared: &Point) -> Result<&BigUint> {
    match shared.x() {
        Some(x) if !x.is_zero() => Ok(x),
        _ => Err(Error::DegenerateSharedSecret),
    }
}

/// Generate an EC key pair
pub fn generate_keypair<R: Rng + ?Sized>(curve: &Curve, rng: &mut R) -> Result<EcKeyPair> {
    let private_key = random_scalar(curve, rng);
    let public_key = curve.scalar_mult(&private_key, curve.generator())?;
    Ok(EcKeyPair {
        private_key,
        public_key,
    })
}

/// Encrypt an integer in `[0, p)` under `public_key`
pub fn encrypt<R: Rng + ?Sized>(
    curve: &Curve,
    public_key: &Point,
    plaintext: &BigUint,
    rng: &mut R,
) -> Result<ElGamalCiphertext> {
    if plaintext >= curve.p() {
        return Err(Error::PlaintextOutOfRange);
    }

    let k = random_scalar(curve, rng);
    let c1 = curve.scalar_mult(&k, curve.generator())?;
    let shared = curve.scalar_mult(&k, public_key)?;
    let c2 = (plaintext * shared_x(&shared)?) % curve.p();

    Ok(ElGamalCiphertext { c1, c2 })
}

/// Recover the plaintext integer with the receiver's private key
pub fn decrypt(curve: &Curve, private_key: &BigUint, ciphertext: &ElGamalCiphertext) -> Result<BigUint> {
    let shared = curve.scalar_mult(private_key, &ciphertext.c1)?;
    let mask_inv = mod_inverse(shared_x(&shared)?, curve.p())?;
    Ok((&ciphertext.c2 * mask_inv) % curve.p())
}
