//! Sigchain replay, validation, and append helpers.
//!
//! Chain integrity:
//!
//!   prev_0 = 32 zero bytes (hex);  prev_{i+1} = SHA-256(raw line i)
//!
//! Every entry carries a detached Ed25519 signature by its authority
//! over the canonical JSON payload. Replay walks the stored lines in
//! order and stops at the first entry that fails the hash link or the
//! signature check; that entry poisons the chain for writes, while the
//! accepted prefix stays readable.

use std::collections::BTreeMap;
use std::fmt;

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use pks_crypto::sign::{verify_detached, SigningKeyPair};
use pks_crypto::CryptoError;
use pks_proto::entry::decode_signed;
use pks_proto::{AddDevice, AuthorityRecord, Entry, KeyKind, SignedKid, Statement, GENESIS_PREV};

use crate::error::ChainError;
use crate::store::Store;

/// Why an entry was rejected during replay. Either fault poisons the
/// chain; everything else that can go wrong surfaces as a [`ChainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFault {
    HashMismatch,
    BadSignature,
}

impl fmt::Display for ChainFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFault::HashMismatch => f.write_str("Hash mismatch"),
            ChainFault::BadSignature => f.write_str("Bad signature"),
        }
    }
}

/// Outcome of validating a single raw entry against the running hash.
#[derive(Debug)]
pub enum Validated {
    /// Entry checks out; `hash` is the link the next entry must carry.
    Accepted { hash: String, entry: Entry },
    /// Entry parsed but failed the hash link or signature check.
    Rejected { entry: Entry, fault: ChainFault },
}

/// What replay knows about one device, keyed by its signing kid.
/// `revoke_seq` is reserved; nothing writes it today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub device_id: String,
    pub signing_kid: String,
    pub name: String,
    pub kind: String,
    pub encryption_key: Option<String>,
    pub signed_by_kid: Option<String>,
    pub revoke_seq: Option<u64>,
}

impl Device {
    fn new(device_id: String, signing_kid: String, name: String, kind: String) -> Self {
        Self {
            device_id,
            signing_kid,
            name,
            kind,
            encryption_key: None,
            signed_by_kid: None,
            revoke_seq: None,
        }
    }
}

pub struct SigChain {
    store: Box<dyn Store>,
    /// Stored lines, in accepted order.
    pub raw_chain: Vec<String>,
    /// Parsed form of `raw_chain`, index for index.
    pub data_chain: Vec<Entry>,
    /// Device index keyed by signing kid.
    pub devices: BTreeMap<String, Device>,
    /// Hash the next entry must link to.
    pub prev_hash: String,
    error_entry: Option<String>,
    error_entry_data: Option<Entry>,
    error_reason: Option<ChainFault>,
}

impl SigChain {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store,
            raw_chain: Vec::new(),
            data_chain: Vec::new(),
            devices: BTreeMap::new(),
            prev_hash: GENESIS_PREV.to_string(),
            error_entry: None,
            error_entry_data: None,
            error_reason: None,
        }
    }

    pub fn len(&self) -> usize {
        self.raw_chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_chain.is_empty()
    }

    /// False once any entry has been rejected. Append helpers are no-ops
    /// on an invalid chain.
    pub fn is_valid(&self) -> bool {
        self.error_entry.is_none()
    }

    pub fn error_reason(&self) -> Option<ChainFault> {
        self.error_reason
    }

    pub fn error_entry(&self) -> Option<&str> {
        self.error_entry.as_deref()
    }

    pub fn error_entry_data(&self) -> Option<&Entry> {
        self.error_entry_data.as_ref()
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    /// Replay the backing store. Stops at the first rejected entry and
    /// records it; the accepted prefix is kept.
    pub fn load(&mut self) -> Result<(), ChainError> {
        for raw in self.store.load()? {
            match Self::validate_entry(&raw, &self.prev_hash)? {
                Validated::Accepted { hash, entry } => {
                    self.prev_hash = hash;
                    self.apply_statement(&entry);
                    self.raw_chain.push(raw);
                    self.data_chain.push(entry);
                }
                Validated::Rejected { entry, fault } => {
                    warn!(seq = entry.seq, %fault, "rejected sigchain entry");
                    self.error_entry = Some(raw);
                    self.error_entry_data = Some(entry);
                    self.error_reason = Some(fault);
                    break;
                }
            }
        }
        debug!(
            entries = self.raw_chain.len(),
            devices = self.devices.len(),
            valid = self.is_valid(),
            "sigchain loaded"
        );
        Ok(())
    }

    /// Check one stored line against the running hash: base64-decode,
    /// split off the 64-byte signature, parse the payload, check the
    /// prev link, then verify the signature under the authority's kid.
    pub fn validate_entry(raw: &str, prev_hash: &str) -> Result<Validated, ChainError> {
        let decoded = decode_signed(raw)?;
        if decoded.entry.prev != prev_hash {
            return Ok(Validated::Rejected {
                entry: decoded.entry,
                fault: ChainFault::HashMismatch,
            });
        }
        let public = hex::decode(&decoded.entry.authority.kid)?;
        match verify_detached(&public, &decoded.payload, &decoded.signature) {
            Ok(()) => Ok(Validated::Accepted {
                hash: entry_hash(raw),
                entry: decoded.entry,
            }),
            Err(CryptoError::SignatureVerification) => Ok(Validated::Rejected {
                entry: decoded.entry,
                fault: ChainFault::BadSignature,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Append an AddDevice entry. With no `signing_key` a fresh device
    /// key is generated and returned; a supplied key stays with the
    /// caller and `None` comes back. No-op returning `None` on an
    /// invalid chain.
    pub fn create_device_and_add(
        &mut self,
        name: &str,
        account: &str,
        kind: &str,
        signing_key: Option<&SigningKeyPair>,
        device_id: Option<String>,
    ) -> Result<Option<SigningKeyPair>, ChainError> {
        if !self.is_valid() {
            return Ok(None);
        }
        let device_id = device_id.unwrap_or_else(pks_crypto::rand::random_hex32);
        match signing_key {
            Some(key) => {
                self.append_add_device(name, account, kind, key, device_id)?;
                Ok(None)
            }
            None => {
                let key = SigningKeyPair::generate();
                self.append_add_device(name, account, kind, &key, device_id)?;
                Ok(Some(key))
            }
        }
    }

    fn append_add_device(
        &mut self,
        name: &str,
        account: &str,
        kind: &str,
        key: &SigningKeyPair,
        device_id: String,
    ) -> Result<(), ChainError> {
        let kid = key.kid();
        let statement =
            Statement::AddDevice(AddDevice::new(device_id.clone(), kind, name, kid.clone()));
        let entry = Entry::new(
            statement,
            AuthorityRecord::new(account, key),
            self.raw_chain.len() as u64,
            Some(self.prev_hash.clone()),
        );
        let raw = entry.encode_signed(key)?;
        self.store.add(&raw)?;
        self.prev_hash = entry_hash(&raw);
        debug!(kid = %kid, seq = entry.seq, "appended AddDevice entry");
        self.devices.insert(
            kid.clone(),
            Device::new(device_id, kid, name.to_string(), kind.to_string()),
        );
        self.raw_chain.push(raw);
        self.data_chain.push(entry);
        Ok(())
    }

    /// Append a SignedKid entry: `signer` attests to `kid`. With
    /// `kind = DeviceEncryption` the target is an encryption key and is
    /// recorded on the signer's own device; otherwise the target is
    /// another device's signing kid and that device is marked signed.
    /// No-op on an invalid chain.
    pub fn sign_kid_and_add(
        &mut self,
        kid: &str,
        signer: &SigningKeyPair,
        account: &str,
        kind: Option<KeyKind>,
    ) -> Result<(), ChainError> {
        if !self.is_valid() {
            return Ok(());
        }
        let statement = Statement::SignedKid(SignedKid::new(kid, signer));
        let entry = Entry::new(
            statement,
            AuthorityRecord::new(account, signer),
            self.raw_chain.len() as u64,
            Some(self.prev_hash.clone()),
        );
        let raw = entry.encode_signed(signer)?;
        self.store.add(&raw)?;
        self.prev_hash = entry_hash(&raw);
        debug!(kid = %kid, seq = entry.seq, "appended SignedKid entry");
        if kind == Some(KeyKind::DeviceEncryption) {
            if let Some(device) = self.devices.get_mut(&signer.kid()) {
                device.encryption_key = Some(kid.to_string());
            }
        } else if let Some(device) = self.devices.get_mut(kid) {
            device.signed_by_kid = Some(signer.kid());
        }
        self.raw_chain.push(raw);
        self.data_chain.push(entry);
        Ok(())
    }

    /// Device-index effect of an accepted entry during replay. A
    /// SignedKid whose subject is a known device signing kid marks that
    /// device signed; any other subject is an encryption-key attestation
    /// recorded on the authority's device. Unattributable attestations
    /// leave the index untouched.
    fn apply_statement(&mut self, entry: &Entry) {
        match &entry.statement {
            Statement::AddDevice(s) => {
                self.devices.insert(
                    s.kid.clone(),
                    Device::new(
                        s.device_id.clone(),
                        s.kid.clone(),
                        s.name.clone(),
                        s.kind.clone(),
                    ),
                );
            }
            Statement::SignedKid(s) => {
                if self.devices.contains_key(&s.kid) {
                    if let Some(device) = self.devices.get_mut(&s.kid) {
                        device.signed_by_kid = Some(entry.authority.kid.clone());
                    }
                } else if let Some(device) = self.devices.get_mut(&entry.authority.kid) {
                    device.encryption_key = Some(s.kid.clone());
                }
            }
        }
    }
}

fn entry_hash(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
