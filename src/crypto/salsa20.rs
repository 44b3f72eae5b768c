//! Salsa20 block function and keystream

use crate::error::{Error, Result};
use crate::types::{BLOCK_LEN, KEY_LEN, NONCE_LEN};

/// Double rounds applied by the block function (column round then diagonal round)
const ROUNDS: usize = 20;

/// Rotate the unreduced 33-bit sum `lhs + rhs` left by `shift` within 32 bits.
///
/// The carry out of bit 31 is not discarded: it lands in bit `shift` of the
/// result. Existing ciphertexts depend on this, so it differs from
/// `wrapping_add(..).rotate_left(..)`.
fn add_rotl(lhs: u32, rhs: u32, shift: u32) -> u32 {
    let v = lhs as u64 + rhs as u64;
    (((v << shift) & 0xffff_ffff) | (v >> (32 - shift))) as u32
}

fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= add_rotl(x[a], x[d], 7);
    x[c] ^= add_rotl(x[b], x[a], 9);
    x[d] ^= add_rotl(x[c], x[b], 13);
    x[a] ^= add_rotl(x[d], x[c], 18);
}

/// Salsa20 core: permute 16 little-endian words and add the input back in
pub fn block_permutation(input: &[u8; BLOCK_LEN]) -> [u8; BLOCK_LEN] {
    let mut x = [0u32; 16];
    for (word, chunk) in x.iter_mut().zip(input.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    let original = x;

    for _ in 0..ROUNDS {
        // Column round
        quarter_round(&mut x, 0, 4, 8, 12);
        quarter_round(&mut x, 5, 9, 13, 1);
        quarter_round(&mut x, 10, 14, 2, 6);
        quarter_round(&mut x, 15, 3, 7, 11);

        // Diagonal round
        quarter_round(&mut x, 0, 1, 2, 3);
        quarter_round(&mut x, 5, 6, 7, 4);
        quarter_round(&mut x, 10, 11, 8, 9);
        quarter_round(&mut x, 15, 12, 13, 14);
    }

    let mut output = [0u8; BLOCK_LEN];
    for ((chunk, word), orig) in output.chunks_exact_mut(4).zip(x.iter()).zip(original.iter()) {
        chunk.copy_from_slice(&word.wrapping_add(*orig).to_le_bytes());
    }
    output
}

pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_LEN {
        return Err(Error::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_nonce(nonce: &[u8]) -> Result<()> {
    if nonce.len() != NONCE_LEN {
        return Err(Error::InvalidNonceLength {
            expected: NONCE_LEN,
            actual: nonce.len(),
        });
    }
    Ok(())
}

/// Generate `length` keystream bytes.
///
/// Block `i` is the core applied to `key[0..16] | nonce | le64(i) | key[16..32]`,
/// zero-filled to 64 bytes.
pub fn keystream(key: &[u8], nonce: &[u8], length: usize) -> Result<Vec<u8>> {
    check_key(key)?;
    check_nonce(nonce)?;

    let mut block = [0u8; BLOCK_LEN];
    block[..16].copy_from_slice(&key[..16]);
    block[16..24].copy_from_slice(nonce);
    block[32..48].copy_from_slice(&key[16..]);

    let mut out = Vec::with_capacity(length);
    let mut counter: u64 = 0;
    while out.len() < length {
        block[24..32].copy_from_slice(&counter.to_le_bytes());
        let stream = block_permutation(&block);
        let take = (length - out.len()).min(BLOCK_LEN);
        out.extend_from_slice(&stream[..take]);
        counter = counter.wrapping_add(1);
    }

    Ok(out)
}

/// XOR `data` with the keystream; applying it twice restores the input
pub fn stream_xor(key: &[u8], nonce: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let stream = keystream(key, nonce, data.len())?;
    Ok(data.iter().zip(stream).map(|(d, k)| d ^ k).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn test_key() -> Vec<u8> {
        (0u8..32).collect()
    }

    fn test_nonce() -> Vec<u8> {
        (1u8..9).collect()
    }

    #[test]
    fn test_block_known_answer() {
        let mut input = [0u8; BLOCK_LEN];
        for (i, byte) in input.iter_mut().enumerate() {
            *byte = i as u8;
        }
        assert_eq!(
            hex::encode(block_permutation(&input)),
            "09e42ef432922e23c3e94bb10b27dc3e937b2391e35b629b52c1beb5adae5d9e\
             a684bced536d195c25eb01e272bd741ad9bbea97a00a87b3fa28090996f9e3d8"
        );
    }

    #[test]
    fn test_add_rotl_keeps_carry() {
        // No carry: plain rotate of the sum
        assert_eq!(add_rotl(1, 2, 7), 3 << 7);
        assert_eq!(add_rotl(0x8000_0000, 0, 1), 1);
        // 0xffffffff + 1 = 2^32: the carry shows up in bit `shift`
        assert_eq!(add_rotl(0xffff_ffff, 1, 7), 1 << 7);
        assert_ne!(add_rotl(0xffff_ffff, 1, 7), 0xffff_ffffu32.wrapping_add(1).rotate_left(7));
        // 0xffffffff + 0xffffffff = 0x1_ffff_fffe
        assert_eq!(add_rotl(0xffff_ffff, 0xffff_ffff, 18), 0xffff_ffff);
    }

    #[test]
    fn test_block_known_answer_all_ones() {
        assert_eq!(
            hex::encode(block_permutation(&[0xffu8; BLOCK_LEN])),
            "fefffffffefffffffefffffffefffffffefffffffefffffffefffffffeffffff\
             fefffffffefffffffefffffffefffffffefffffffefffffffefffffffeffffff"
        );
    }

    #[test]
    fn test_keystream_known_answer_all_ones() {
        let stream = keystream(&[0xffu8; KEY_LEN], &[0xffu8; NONCE_LEN], 80).unwrap();
        assert_eq!(
            hex::encode(stream),
            "fffffffffefffffffefffffffffffffffffffffffeffffff00000000ffffffff\
             fffffffffefffffffeffffffffffffff00000000ffffffffffffffffffffffff\
             584edf5966788557a9ad691dcbf4ff59"
        );
    }

    #[test]
    fn test_block_of_zeros_is_fixed_point() {
        assert_eq!(block_permutation(&[0u8; BLOCK_LEN]), [0u8; BLOCK_LEN]);
    }

    #[test]
    fn test_keystream_known_answer() {
        let stream = keystream(&test_key(), &test_nonce(), 80).unwrap();
        assert_eq!(
            hex::encode(stream),
            "c9fd741c85b42d3082d438adf482e6a29aa0d2762b5e1b6b96e95abd578b6726\
             22fad497345d2663dbb12e5a50849c8f3b88d8432f4b6aa104d0c3fbd69c360d\
             c39e1cd127813ed4c7a407734fee7262"
        );
    }

    #[test]
    fn test_keystream_is_prefix_stable() {
        let long = keystream(&test_key(), &test_nonce(), 200).unwrap();
        let short = keystream(&test_key(), &test_nonce(), 70).unwrap();
        assert_eq!(&long[..70], &short[..]);
        assert!(keystream(&test_key(), &test_nonce(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_stream_xor_self_inverse() {
        let mut rng = StdRng::seed_from_u64(20);
        for len in [0usize, 1, 63, 64, 65, 1000] {
            let key: [u8; KEY_LEN] = rng.gen();
            let nonce: [u8; NONCE_LEN] = rng.gen();
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

            let encrypted = stream_xor(&key, &nonce, &data).unwrap();
            assert_eq!(encrypted.len(), len);
            if len >= 16 {
                assert_ne!(encrypted, data);
            }
            assert_eq!(stream_xor(&key, &nonce, &encrypted).unwrap(), data, "len = {}", len);
        }
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let data = b"payload";
        assert!(matches!(
            stream_xor(&[0u8; 31], &test_nonce(), data),
            Err(Error::InvalidKeyLength { expected: 32, actual: 31 })
        ));
        assert!(matches!(
            stream_xor(&[0u8; 33], &test_nonce(), data),
            Err(Error::InvalidKeyLength { expected: 32, actual: 33 })
        ));
        assert!(matches!(
            stream_xor(&test_key(), &[0u8; 7], data),
            Err(Error::InvalidNonceLength { expected: 8, actual: 7 })
        ));
        assert!(matches!(
            keystream(&test_key(), &[0u8; 12], 4),
            Err(Error::InvalidNonceLength { expected: 8, actual: 12 })
        ));
    }
}
