//! Sender side: wrap the session key, sign it, encrypt the payload

use std::path::Path;

use rand::Rng;

use super::{ciphertext_transcript, session_key_to_int, Envelope};
use crate::crypto::{elgamal, ofb, rsa, Curve, Point, RsaPrivateKey};
use crate::error::Result;
use crate::types::KEY_LEN;

/// Encrypt `session_key` to `recipient`, sign the encrypted key with `signer`
/// and encrypt `input` into `output` under the session key.
pub fn seal<R: Rng + ?Sized>(
    curve: &Curve,
    recipient: &Point,
    signer: &RsaPrivateKey,
    session_key: &[u8; KEY_LEN],
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    rng: &mut R,
) -> Result<Envelope> {
    let encrypted_key = elgamal::encrypt(curve, recipient, &session_key_to_int(session_key), rng)?;
    let signature = rsa::sign_message(signer, ciphertext_transcript(&encrypted_key).as_bytes())?;

    ofb::encrypt_file(input, output, session_key, rng)?;

    Ok(Envelope {
        encrypted_key,
        signature,
    })
}
