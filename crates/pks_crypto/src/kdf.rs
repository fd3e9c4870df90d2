//! Password key derivation.
//!
//! `password_kdf` — Argon2i, derives the 32-byte key that encrypts the
//! client envelope at rest. Parameters are libsodium's
//! `crypto_pwhash_argon2i` INTERACTIVE limits; the envelope format pins
//! them.

use argon2::{Argon2, Params, Version};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;
use crate::secretbox;

/// Salt length, matching libsodium's `crypto_pwhash_argon2i_SALTBYTES`.
pub const SALTBYTES: usize = 16;

/// libsodium `crypto_pwhash_argon2i_OPSLIMIT_INTERACTIVE`.
const OPSLIMIT_INTERACTIVE: u32 = 4;

/// libsodium `crypto_pwhash_argon2i_MEMLIMIT_INTERACTIVE` (32 MiB), in KiB.
const MEMLIMIT_INTERACTIVE_KIB: u32 = 32 * 1024;

/// 32-byte envelope key derived from the user password. Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct EnvelopeKey(pub [u8; secretbox::KEY_LEN]);

fn argon2_params() -> Params {
    Params::new(
        MEMLIMIT_INTERACTIVE_KIB,
        OPSLIMIT_INTERACTIVE,
        1,
        Some(secretbox::KEY_LEN),
    )
    .expect("Static Argon2 params are always valid")
}

/// Derive an envelope key from a user password + 16-byte salt.
/// The salt is stored alongside the ciphertext (not secret).
pub fn password_kdf(password: &[u8], salt: &[u8; SALTBYTES]) -> Result<EnvelopeKey, CryptoError> {
    let argon2 = Argon2::new(argon2::Algorithm::Argon2i, Version::V0x13, argon2_params());
    let mut output = [0u8; secretbox::KEY_LEN];
    argon2
        .hash_password_into(password, salt, &mut output)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(EnvelopeKey(output))
}

/// Generate a fresh random 16-byte salt.
pub fn generate_salt() -> [u8; SALTBYTES] {
    use rand::RngCore;
    let mut salt = [0u8; SALTBYTES];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_same_salt_same_key() {
        let salt = [9u8; SALTBYTES];
        let a = password_kdf(b"password", &salt).unwrap();
        let b = password_kdf(b"password", &salt).unwrap();
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn different_salt_different_key() {
        let a = password_kdf(b"password", &[1u8; SALTBYTES]).unwrap();
        let b = password_kdf(b"password", &[2u8; SALTBYTES]).unwrap();
        assert_ne!(a.0, b.0);
    }

    #[test]
    fn different_password_different_key() {
        let salt = generate_salt();
        let a = password_kdf(b"password", &salt).unwrap();
        let b = password_kdf(b"password1", &salt).unwrap();
        assert_ne!(a.0, b.0);
    }
}
