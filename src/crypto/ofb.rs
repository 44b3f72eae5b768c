//! Output-feedback chaining over the Salsa20 keystream, plus the file wrapper

use std::fs;
use std::path::Path;

use rand::Rng;

use super::salsa20::{check_key, check_nonce, stream_xor};
use crate::error::{Error, Result};
use crate::types::{BLOCK_LEN, NONCE_LEN};

/// Encrypt in OFB mode.
///
/// Each 64-byte block is XORed with a fresh keystream derived from the current
/// chaining value; the first 8 bytes of that keystream become the next chaining
/// value. The chaining value starts at `iv`.
pub fn ofb_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;
    check_nonce(iv)?;

    let zeros = [0u8; BLOCK_LEN];
    let mut chain = [0u8; NONCE_LEN];
    chain.copy_from_slice(iv);

    let mut out = Vec::with_capacity(plaintext.len());
    for block in plaintext.chunks(BLOCK_LEN) {
        let stream = stream_xor(key, &chain, &zeros)?;
        out.extend(block.iter().zip(&stream).map(|(p, k)| p ^ k));
        chain.copy_from_slice(&stream[..NONCE_LEN]);
    }

    Ok(out)
}

/// OFB decryption is the same operation as encryption
pub fn ofb_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    ofb_encrypt(key, iv, ciphertext)
}

/// Encrypt a file; the output is `iv (8 bytes) | ciphertext` with a random IV
pub fn encrypt_file<R: Rng + ?Sized>(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    key: &[u8],
    rng: &mut R,
) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    check_key(key)?;

    let plaintext = fs::read(input).map_err(|e| Error::io(input, e))?;
    let iv: [u8; NONCE_LEN] = rng.gen();
    let ciphertext = ofb_encrypt(key, &iv, &plaintext)?;

    let mut data = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    data.extend_from_slice(&iv);
    data.extend_from_slice(&ciphertext);
    fs::write(output, data).map_err(|e| Error::io(output, e))
}

/// Decrypt a file produced by [`encrypt_file`]
pub fn decrypt_file(input: impl AsRef<Path>, output: impl AsRef<Path>, key: &[u8]) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    check_key(key)?;

    let data = fs::read(input).map_err(|e| Error::io(input, e))?;
    if data.len() < NONCE_LEN {
        return Err(Error::TruncatedInput { len: data.len() });
    }

    let (iv, ciphertext) = data.split_at(NONCE_LEN);
    let plaintext = ofb_decrypt(key, iv, ciphertext)?;
    fs::write(output, plaintext).map_err(|e| Error::io(output, e))
}
