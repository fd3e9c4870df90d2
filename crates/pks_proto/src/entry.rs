//! Chain entries: a statement plus the authority that signs it.
//!
//! Signed wire form: `base64( signature(64) || canonical_json )`, where
//! the signature is the authority's detached Ed25519 signature over the
//! canonical JSON bytes. The first entry of a chain links to a prev of
//! 64 zero nibbles.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use pks_crypto::sign::{SigningKeyPair, SIGNATURE_LEN};

use crate::canonical::to_canonical_vec;
use crate::error::ProtoError;
use crate::statement::Statement;

/// prev-hash of the first entry: 32 zero bytes, hex-encoded.
pub const GENESIS_PREV: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// The (kid, username) pair an entry is signed under.
/// Field order is the canonical emit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    pub kid: String,
    pub username: String,
}

impl AuthorityRecord {
    pub fn new(username: impl Into<String>, signing_key: &SigningKeyPair) -> Self {
        Self {
            kid: signing_key.kid(),
            username: username.into(),
        }
    }
}

/// One link of the chain. Field order is the canonical emit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub statement: Statement,
    pub authority: AuthorityRecord,
    pub prev: String,
    pub seq: u64,
}

impl Entry {
    /// `prev = None` produces a genesis link.
    pub fn new(
        statement: Statement,
        authority: AuthorityRecord,
        seq: u64,
        prev: Option<String>,
    ) -> Self {
        Self {
            statement,
            authority,
            prev: prev.unwrap_or_else(|| GENESIS_PREV.to_string()),
            seq,
        }
    }

    /// The exact bytes that get signed and hashed.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        to_canonical_vec(self)
    }

    /// `signature || canonical_json`. The key must be the authority's.
    pub fn sign(&self, key: &SigningKeyPair) -> Result<Vec<u8>, ProtoError> {
        if key.kid() != self.authority.kid {
            return Err(ProtoError::AuthorityMismatch);
        }
        let payload = self.canonical_bytes()?;
        let sig = key.sign(&payload);
        let mut out = Vec::with_capacity(SIGNATURE_LEN + payload.len());
        out.extend_from_slice(&sig);
        out.extend_from_slice(&payload);
        Ok(out)
    }

    /// The stored form: base64 of [`Entry::sign`].
    pub fn encode_signed(&self, key: &SigningKeyPair) -> Result<String, ProtoError> {
        Ok(STANDARD.encode(self.sign(key)?))
    }
}

/// A stored entry split back into its parts. The signature covers
/// exactly `payload`.
pub struct DecodedEntry {
    pub signature: Vec<u8>,
    pub payload: Vec<u8>,
    pub entry: Entry,
}

/// Decode one stored chain line.
pub fn decode_signed(raw: &str) -> Result<DecodedEntry, ProtoError> {
    let decoded = STANDARD.decode(raw)?;
    if decoded.len() < SIGNATURE_LEN {
        return Err(ProtoError::TruncatedEntry);
    }
    let (signature, payload) = decoded.split_at(SIGNATURE_LEN);
    let entry: Entry = serde_json::from_slice(payload)?;
    Ok(DecodedEntry {
        signature: signature.to_vec(),
        payload: payload.to_vec(),
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::{AddDevice, SignedKid};
    use pks_crypto::sign::verify_detached;

    /// A pre-signed genesis AddDevice entry (prev = all zeros), produced
    /// by a compatible implementation. Pins the wire format.
    const GENESIS_ADD_DEVICE: &str = concat!(
        "dUJoqn66lPaov7Rn0Vgjtv8M3ZGtZckUrW3MLms9em4cmKxleZ3AQSkw1ZtvMAW93v3J175k0Yao68dtkZSVAXsic3RhdGVtZW50Ijogey",
        "JkZXZpY2VfaWQiOiAiIiwgImtpbmQiOiAidGVzdCIsICJuYW1lIjogInRlc3QgZm9yIGJhZCBzaWduYXR1cmUiLCAia2lkIjogIjkxMWNm",
        "ZjVmOTFiZjU2NWQ3YzAxZDJlMDNlNTc5YTc1N2VjNGU4N2IxNTRjMzRmOWYwOWE3ZDllOTJiYzMzZTYiLCAic3RhdGVtZW50X3R5cGUiOi",
        "Aic2VsZi1zaWduZWQtZGV2aWNlIn0sICJhdXRob3JpdHkiOiB7ImtpZCI6ICI5MTFjZmY1ZjkxYmY1NjVkN2MwMWQyZTAzZTU3OWE3NTdl",
        "YzRlODdiMTU0YzM0ZjlmMDlhN2Q5ZTkyYmMzM2U2IiwgInVzZXJuYW1lIjogInRlc3QifSwgInByZXYiOiAiMDAwMDAwMDAwMDAwMDAwMD",
        "AwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwMCIsICJzZXEiOiAwfQ=="
    );

    #[test]
    fn golden_entry_reserialises_byte_identical() {
        let decoded = decode_signed(GENESIS_ADD_DEVICE).unwrap();
        let reserialised = decoded.entry.canonical_bytes().unwrap();
        assert_eq!(reserialised, decoded.payload);
    }

    #[test]
    fn golden_entry_signature_verifies() {
        let decoded = decode_signed(GENESIS_ADD_DEVICE).unwrap();
        let public = hex::decode(&decoded.entry.authority.kid).unwrap();
        assert!(verify_detached(&public, &decoded.payload, &decoded.signature).is_ok());
        assert_eq!(decoded.entry.prev, GENESIS_PREV);
        assert_eq!(decoded.entry.seq, 0);
    }

    #[test]
    fn sign_encode_decode_roundtrip() {
        let key = SigningKeyPair::generate();
        let statement = Statement::AddDevice(AddDevice::new("d1", "laptop", "work", key.kid()));
        let authority = AuthorityRecord::new("user", &key);
        let entry = Entry::new(statement, authority, 0, None);

        let raw = entry.encode_signed(&key).unwrap();
        let decoded = decode_signed(&raw).unwrap();
        assert_eq!(decoded.entry, entry);

        let public = hex::decode(&decoded.entry.authority.kid).unwrap();
        assert!(verify_detached(&public, &decoded.payload, &decoded.signature).is_ok());
    }

    #[test]
    fn sign_rejects_foreign_key() {
        let key = SigningKeyPair::generate();
        let other = SigningKeyPair::generate();
        let statement = Statement::SignedKid(SignedKid::new("deadbeef", &key));
        let entry = Entry::new(statement, AuthorityRecord::new("user", &key), 1, None);
        assert!(matches!(
            entry.sign(&other),
            Err(ProtoError::AuthorityMismatch)
        ));
    }

    #[test]
    fn truncated_entry_is_an_error() {
        // 8 bytes of payload — far short of a 64-byte signature.
        let raw = STANDARD.encode([0u8; 8]);
        assert!(matches!(
            decode_signed(&raw),
            Err(ProtoError::TruncatedEntry)
        ));
    }
}
