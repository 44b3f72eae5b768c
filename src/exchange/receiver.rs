//! Receiver side: check the signature, unwrap the session key, decrypt the payload

use std::path::Path;

use num_bigint::BigUint;

use super::{ciphertext_transcript, int_to_session_key, Envelope};
use crate::crypto::{elgamal, ofb, rsa, Curve, RsaPublicKey};
use crate::error::{Error, Result};
use crate::types::KEY_LEN;

/// Check that the encrypted key in `envelope` was signed by `sender`
pub fn verify_envelope(sender: &RsaPublicKey, envelope: &Envelope) -> bool {
    let transcript = ciphertext_transcript(&envelope.encrypted_key);
    rsa::verify_message(sender, transcript.as_bytes(), &envelope.signature)
}

/// Verify the envelope, recover the session key and decrypt `input` into `output`
pub fn open(
    curve: &Curve,
    recipient_key: &BigUint,
    sender: &RsaPublicKey,
    envelope: &Envelope,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<[u8; KEY_LEN]> {
    if !verify_envelope(sender, envelope) {
        return Err(Error::SignatureMismatch);
    }

    let value = elgamal::decrypt(curve, recipient_key, &envelope.encrypted_key)?;
    let session_key = int_to_session_key(&value)?;

    ofb::decrypt_file(input, output, &session_key)?;
    Ok(session_key)
}
