//! Ed25519 signing keypairs.
//!
//! A key's stable identifier (its *kid*) is the hex encoding of the
//! 32-byte verify key. Signatures are detached 64-byte Ed25519
//! signatures over the raw message bytes.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier as _, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// Detached Ed25519 signatures are always 64 bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Ed25519 public keys (and therefore kids, before hex) are 32 bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signing keypair. Drop clears the secret half via ZeroizeOnDrop.
#[derive(ZeroizeOnDrop)]
pub struct SigningKeyPair {
    #[zeroize(skip)]
    public: [u8; PUBLIC_KEY_LEN],
    secret_bytes: [u8; 32],
}

impl SigningKeyPair {
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Deterministic keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!("Signing key must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self::from_seed(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            public: signing_key.verifying_key().to_bytes(),
            secret_bytes: signing_key.to_bytes(),
        }
    }

    pub fn public_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public
    }

    /// Hex of the verify key — the key's identifier in chain statements.
    pub fn kid(&self) -> String {
        hex::encode(self.public)
    }

    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret_bytes
    }

    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.secret_bytes)
    }

    /// Sign arbitrary bytes; returns the 64-byte detached signature.
    pub fn sign(&self, msg: &[u8]) -> [u8; SIGNATURE_LEN] {
        self.signing_key().sign(msg).to_bytes()
    }
}

/// Verify a detached signature made by any Ed25519 public key.
///
/// Malformed inputs (wrong key or signature length, off-curve key) are
/// `InvalidKey`; an authentic-looking signature that does not check out
/// is `SignatureVerification`.
pub fn verify_detached(public: &[u8], msg: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let public: [u8; PUBLIC_KEY_LEN] = public
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("Bad pubkey len".into()))?;
    let vk = VerifyingKey::from_bytes(&public)
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let sig_bytes: [u8; SIGNATURE_LEN] = sig
        .try_into()
        .map_err(|_| CryptoError::InvalidKey("Bad sig len".into()))?;
    let sig = Signature::from_bytes(&sig_bytes);
    vk.verify(msg, &sig)
        .map_err(|_| CryptoError::SignatureVerification)
}
