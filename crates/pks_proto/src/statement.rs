//! Chain statements.
//!
//! Two statement kinds exist today: `AddDevice` (a device key announcing
//! itself, self-signed) and `SignedKid` (an existing device key attesting
//! to another key). On load, the kind is discriminated by the exact
//! key-set of the JSON object — both variants reject unknown fields, so
//! the untagged enum matches exactly one shape.

use serde::{Deserialize, Serialize};

use pks_crypto::sign::SigningKeyPair;

/// `statement_type` carried by every AddDevice statement.
pub const SELF_SIGNED_DEVICE: &str = "self-signed-device";

/// A device key announcing itself. Field order is the canonical emit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddDevice {
    pub device_id: String,
    pub kind: String,
    pub name: String,
    pub kid: String,
    pub statement_type: String,
}

impl AddDevice {
    pub fn new(
        device_id: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        kid: impl Into<String>,
    ) -> Self {
        Self {
            device_id: device_id.into(),
            kind: kind.into(),
            name: name.into(),
            kid: kid.into(),
            statement_type: SELF_SIGNED_DEVICE.to_string(),
        }
    }
}

/// An attestation: `signed_kid` is the signer's detached Ed25519 signature
/// over the UTF-8 bytes of `kid`, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignedKid {
    pub kid: String,
    pub signed_kid: String,
}

impl SignedKid {
    pub fn new(kid: impl Into<String>, signer: &SigningKeyPair) -> Self {
        let kid = kid.into();
        let signed_kid = hex::encode(signer.sign(kid.as_bytes()));
        Self { kid, signed_kid }
    }
}

/// Closed sum of the statement kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Statement {
    AddDevice(AddDevice),
    SignedKid(SignedKid),
}

impl Statement {
    /// The key this statement is about.
    pub fn kid(&self) -> &str {
        match self {
            Statement::AddDevice(s) => &s.kid,
            Statement::SignedKid(s) => &s.kid,
        }
    }
}
