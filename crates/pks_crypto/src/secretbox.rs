//! Authenticated secret-box encryption.
//!
//! XSalsa20-Poly1305 with libsodium's `crypto_secretbox` semantics.
//! Key size: 32 bytes. Nonce: 24 bytes (random). Tag: 16 bytes.
//!
//! Ciphertext wire format:
//!   [ nonce (24 bytes) | ciphertext + tag ]

use crypto_secretbox::{
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    XSalsa20Poly1305,
};
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 24;

/// Encrypt `plaintext` with a 32-byte key, prepending a random 24-byte nonce.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher =
        XSalsa20Poly1305::new_from_slice(key).map_err(|_| CryptoError::SecretboxSeal)?;

    let nonce = XSalsa20Poly1305::generate_nonce(&mut AeadOsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CryptoError::SecretboxSeal)?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt wire-format bytes (nonce || ciphertext+tag).
pub fn decrypt(key: &[u8; KEY_LEN], data: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if data.len() < NONCE_LEN {
        return Err(CryptoError::SecretboxOpen);
    }
    let (nonce_bytes, ct) = data.split_at(NONCE_LEN);
    let nonce = crypto_secretbox::Nonce::from_slice(nonce_bytes);

    let cipher =
        XSalsa20Poly1305::new_from_slice(key).map_err(|_| CryptoError::SecretboxOpen)?;

    let plaintext = cipher
        .decrypt(nonce, ct)
        .map_err(|_| CryptoError::SecretboxOpen)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let key = [4u8; KEY_LEN];
        let boxed = encrypt(&key, b"client metadata").unwrap();
        let opened = decrypt(&key, &boxed).unwrap();
        assert_eq!(&opened[..], b"client metadata");
    }

    #[test]
    fn wrong_key_fails() {
        let boxed = encrypt(&[4u8; KEY_LEN], b"client metadata").unwrap();
        assert!(matches!(
            decrypt(&[5u8; KEY_LEN], &boxed),
            Err(CryptoError::SecretboxOpen)
        ));
    }

    #[test]
    fn single_bit_flip_fails() {
        let key = [4u8; KEY_LEN];
        let mut boxed = encrypt(&key, b"client metadata").unwrap();
        let mid = boxed.len() / 2;
        boxed[mid] ^= 0x01;
        assert!(matches!(decrypt(&key, &boxed), Err(CryptoError::SecretboxOpen)));
    }

    #[test]
    fn truncated_input_fails() {
        assert!(decrypt(&[0u8; KEY_LEN], &[0u8; 8]).is_err());
    }
}
