//! X25519 encryption keypairs.
//!
//! The core only derives and publishes these keys; Diffie-Hellman
//! agreement itself happens in the consumers of the chain.

use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// X25519 keypair. Drop clears the secret half via ZeroizeOnDrop.
#[derive(ZeroizeOnDrop)]
pub struct EncryptionKeyPair {
    #[zeroize(skip)]
    public: [u8; 32],
    secret_bytes: [u8; 32],
}

impl EncryptionKeyPair {
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut seed);
        Self::from_seed(&seed)
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let secret = StaticSecret::from(*seed);
        let public = PublicKey::from(&secret);
        Self {
            public: public.to_bytes(),
            secret_bytes: secret.to_bytes(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Encryption key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::from_seed(&seed))
    }

    pub fn public_bytes(&self) -> &[u8; 32] {
        &self.public
    }

    /// Hex of the public key — how encryption keys appear in chain
    /// statements.
    pub fn public_hex(&self) -> String {
        hex::encode(self.public)
    }

    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic() {
        let seed = [3u8; 32];
        let a = EncryptionKeyPair::from_seed(&seed);
        let b = EncryptionKeyPair::from_seed(&seed);
        assert_eq!(a.public_bytes(), b.public_bytes());
    }

    #[test]
    fn distinct_seeds_distinct_publics() {
        let a = EncryptionKeyPair::from_seed(&[1u8; 32]);
        let b = EncryptionKeyPair::from_seed(&[2u8; 32]);
        assert_ne!(a.public_hex(), b.public_hex());
    }
}
