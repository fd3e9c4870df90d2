//! The local client: device identity, key generation, chain
//! association, and the at-rest envelope.
//!
//! Envelope layout: 16 bytes of salt, then one secretbox ciphertext of
//! the canonical JSON client metadata (`id`, `name`,
//! `sigchain.location`), keyed by Argon2i over the user password.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::info;

use pks_chain::{create_store, SigChain};
use pks_crypto::derive::derive_seed;
use pks_crypto::dh::EncryptionKeyPair;
use pks_crypto::kdf::{generate_salt, password_kdf, SALTBYTES};
use pks_crypto::rand::{random_hex32, random_seed};
use pks_crypto::secretbox;
use pks_crypto::sign::SigningKeyPair;
use pks_proto::canonical::to_canonical_vec;
use pks_proto::KeyKind;

use crate::error::ClientError;
use crate::keyring::{Key, Keyring};

/// Domain-separation label for the device signing seed (exact bytes).
pub const DEVICE_SIG_LABEL: &[u8] = b"Derived-Device-NaCl-EdDSA-1";

/// Domain-separation label for the device encryption seed (exact bytes).
pub const DEVICE_DH_LABEL: &[u8] = b"Derived-User-NaCl-DH-1";

/// Device kind recorded by the AddDevice entry a client emits for itself.
const DEVICE_KIND: &str = "device";

/// Derive the device signing and encryption keypairs from one 32-byte
/// master seed. Deterministic: the same seed always yields the same
/// keypairs.
pub fn device_keys_from_seed(seed: &[u8; 32]) -> (SigningKeyPair, EncryptionKeyPair) {
    let signing_seed = derive_seed(seed, DEVICE_SIG_LABEL);
    let dh_seed = derive_seed(seed, DEVICE_DH_LABEL);
    (
        SigningKeyPair::from_seed(&signing_seed),
        EncryptionKeyPair::from_seed(&dh_seed),
    )
}

/// Client metadata as stored inside the envelope. Field order is the
/// canonical emit order.
#[derive(Serialize, Deserialize)]
struct EnvelopeMeta {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "sigchain.location")]
    sigchain_location: Option<String>,
}

#[derive(Default)]
pub struct Client {
    pub id: Option<String>,
    pub name: Option<String>,
    pub keyring: Option<Box<dyn Keyring>>,
    pub sigchain: Option<SigChain>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("keyring", &self.keyring.as_ref().map(|_| "<keyring>"))
            .field("sigchain", &self.sigchain.as_ref().map(|_| "<sigchain>"))
            .finish()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh identity: a random 32-byte id, device signing and
    /// encryption keys derived from one master seed, and a keyring from
    /// `make_keyring` holding both. With a `sigchain_loc`, also
    /// associate a new chain there.
    pub fn generate<F>(
        &mut self,
        name: &str,
        make_keyring: F,
        sigchain_loc: Option<&str>,
    ) -> Result<(), ClientError>
    where
        F: FnOnce() -> Box<dyn Keyring>,
    {
        self.id = Some(random_hex32());
        self.name = Some(name.to_string());

        let seed = random_seed();
        let (signing, encryption) = device_keys_from_seed(&seed);

        let mut keyring = make_keyring();
        keyring.set(
            KeyKind::DeviceSigning,
            vec![Key::new(
                KeyKind::DeviceSigning,
                Some(signing.secret_bytes().to_vec()),
                signing.public_bytes().to_vec(),
            )],
        );
        keyring.set(
            KeyKind::DeviceEncryption,
            vec![Key::new(
                KeyKind::DeviceEncryption,
                Some(encryption.secret_bytes().to_vec()),
                encryption.public_bytes().to_vec(),
            )],
        );
        self.keyring = Some(keyring);
        info!(name = %name, "generated client identity");

        if let Some(loc) = sigchain_loc {
            self.associate_sigchain(loc)?;
        }
        Ok(())
    }

    /// Bind a fresh sigchain at `loc` to this client: an AddDevice entry
    /// self-signed by the latest device signing key (the client id is
    /// the device id), then a SignedKid entry binding the device
    /// encryption public key under the same signing key.
    pub fn associate_sigchain(&mut self, loc: &str) -> Result<(), ClientError> {
        let keyring = self.keyring.as_ref().ok_or(ClientError::NoKeyring)?;
        let signing = keyring
            .get(KeyKind::DeviceSigning)
            .and_then(|keys| keys.last())
            .ok_or(ClientError::NoDeviceSigningKey)?;
        let encryption = keyring
            .get(KeyKind::DeviceEncryption)
            .and_then(|keys| keys.last())
            .ok_or(ClientError::NoDeviceEncryptionKey)?;
        if self.sigchain.is_some() {
            return Err(ClientError::SigchainExists);
        }
        let (id, name) = match (self.id.as_ref(), self.name.as_ref()) {
            (Some(id), Some(name)) => (id.clone(), name.clone()),
            _ => return Err(ClientError::MissingIdentity),
        };

        let signing_priv = signing.private.as_ref().ok_or(ClientError::LockedKey)?;
        let signing_key = SigningKeyPair::from_bytes(signing_priv)?;
        let encryption_kid = hex::encode(&encryption.public);

        let mut chain = SigChain::new(create_store(loc, None)?);
        chain.create_device_and_add(&name, &name, DEVICE_KIND, Some(&signing_key), Some(id))?;
        chain.sign_kid_and_add(
            &encryption_kid,
            &signing_key,
            &name,
            Some(KeyKind::DeviceEncryption),
        )?;
        info!(location = %chain.location(), "associated new sigchain");
        self.sigchain = Some(chain);
        Ok(())
    }

    /// Write the encrypted envelope to `sink` and lock the keyring.
    pub fn store<W: Write>(&mut self, password: &str, sink: &mut W) -> Result<(), ClientError> {
        let salt = generate_salt();
        sink.write_all(&salt)?;

        let key = password_kdf(password.as_bytes(), &salt)?;
        let meta = EnvelopeMeta {
            id: self.id.clone(),
            name: self.name.clone(),
            sigchain_location: self.sigchain.as_ref().map(SigChain::location),
        };
        let plaintext = to_canonical_vec(&meta)?;
        let boxed = secretbox::encrypt(&key.0, &plaintext)?;
        sink.write_all(&boxed)?;

        if let Some(keyring) = self.keyring.as_mut() {
            keyring.lock(password)?;
        }
        Ok(())
    }

    /// Read an envelope from `source`, restore id and name, and replay
    /// the associated sigchain when one is recorded. A wrong password or
    /// tampered envelope surfaces as a crypto error, untouched.
    pub fn load<R: Read>(&mut self, password: &str, source: &mut R) -> Result<(), ClientError> {
        let mut salt = [0u8; SALTBYTES];
        source.read_exact(&mut salt)?;
        let mut ciphertext = Vec::new();
        source.read_to_end(&mut ciphertext)?;

        let key = password_kdf(password.as_bytes(), &salt)?;
        let plaintext = secretbox::decrypt(&key.0, &ciphertext)?;
        let meta: EnvelopeMeta = serde_json::from_slice(&plaintext)?;

        self.id = meta.id;
        self.name = meta.name;
        if let Some(loc) = meta.sigchain_location {
            let mut chain = SigChain::new(create_store(&loc, None)?);
            chain.load()?;
            self.sigchain = Some(chain);
        }
        Ok(())
    }
}
