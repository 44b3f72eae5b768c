//! Hybrid key exchange: EC-ElGamal key transport, RSA-signed, Salsa20-OFB payload

pub mod receiver;
pub mod sender;

pub use receiver::open;
pub use sender::seal;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use num_bigint::BigUint;
use rand::Rng;
use tracing::{debug, info};

use crate::crypto::{bigint_to_bytes_be, bytes_to_bigint_be, elgamal, rsa, Curve, ElGamalCiphertext, Point};
use crate::error::{Error, Result};
use crate::types::KEY_LEN;

/// What the sender transmits besides the encrypted file
#[derive(Clone, Debug)]
pub struct Envelope {
    pub encrypted_key: ElGamalCiphertext,
    pub signature: Vec<u8>,
}

/// File locations and key sizes for one run of the exchange
#[derive(Clone, Debug)]
pub struct ExchangeConfig {
    pub input: PathBuf,
    pub encrypted: PathBuf,
    pub decrypted: PathBuf,
    pub rsa_bits: u64,
}

/// Outcome of [`run_exchange`]
#[derive(Clone, Debug)]
pub struct ExchangeReport {
    pub session_key: [u8; KEY_LEN],
    pub recovered_key: [u8; KEY_LEN],
    pub envelope: Envelope,
    pub files_match: bool,
}

/// Draw a random symmetric key whose big-endian value fits the ElGamal plaintext range
pub fn generate_session_key<R: Rng + ?Sized>(curve: &Curve, rng: &mut R) -> [u8; KEY_LEN] {
    loop {
        let key: [u8; KEY_LEN] = rng.gen();
        if &bytes_to_bigint_be(&key) < curve.p() {
            return key;
        }
    }
}

/// Interpret a session key as a big-endian integer
pub fn session_key_to_int(key: &[u8; KEY_LEN]) -> BigUint {
    bytes_to_bigint_be(key)
}

/// Re-encode a decrypted integer as a 32-byte big-endian session key
pub fn int_to_session_key(value: &BigUint) -> Result<[u8; KEY_LEN]> {
    let bytes = bigint_to_bytes_be(value, KEY_LEN);
    bytes.as_slice().try_into().map_err(|_| Error::InvalidKeyLength {
        expected: KEY_LEN,
        actual: bytes.len(),
    })
}

/// Text form of the encrypted key that gets signed: `((x, y), c2)`
pub fn ciphertext_transcript(ciphertext: &ElGamalCiphertext) -> String {
    match &ciphertext.c1 {
        Point::Infinity => format!("(None, {})", ciphertext.c2),
        Point::Affine { x, y } => format!("(({}, {}), {})", x, y, ciphertext.c2),
    }
}

/// Run the whole workflow: key generation, sealing on the sender side, opening
/// on the receiver side and a byte comparison of the two files.
pub fn run_exchange<R: Rng + ?Sized>(
    curve: &Curve,
    config: &ExchangeConfig,
    rng: &mut R,
) -> anyhow::Result<ExchangeReport> {
    info!(bits = config.rsa_bits, "Generating RSA keypair");
    let rsa_pair = rsa::generate_rsa_keypair(config.rsa_bits, rng).context("RSA key generation failed")?;

    info!("Generating EC keypair");
    let ec_pair = elgamal::generate_keypair(curve, rng).context("EC key generation failed")?;
    debug!(private_key = %ec_pair.private_key, public_key = ?ec_pair.public_key, "EC keypair");

    info!("Generating SALSA20 key");
    let session_key = generate_session_key(curve, rng);
    debug!(key = %hex::encode(session_key), "SALSA20 key");

    info!("Sealing {}", config.input.display());
    let envelope = seal(
        curve,
        &ec_pair.public_key,
        &rsa_pair.private,
        &session_key,
        &config.input,
        &config.encrypted,
        rng,
    )
    .context("Sender side failed")?;
    debug!(
        encrypted_key = %ciphertext_transcript(&envelope.encrypted_key),
        signature = %hex::encode(&envelope.signature),
        "Envelope"
    );

    info!("Opening {} on the receiver side", config.encrypted.display());
    let recovered_key = open(
        curve,
        &ec_pair.private_key,
        &rsa_pair.public,
        &envelope,
        &config.encrypted,
        &config.decrypted,
    )
    .context("Receiver side failed")?;
    debug!(key = %hex::encode(recovered_key), "Recovered SALSA20 key");

    let original = fs::read(&config.input).with_context(|| format!("Failed to read {}", config.input.display()))?;
    let decrypted =
        fs::read(&config.decrypted).with_context(|| format!("Failed to read {}", config.decrypted.display()))?;
    let files_match = original == decrypted;

    Ok(ExchangeReport {
        session_key,
        recovered_key,
        envelope,
        files_match,
    })
}
