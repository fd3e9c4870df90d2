use thiserror::Error;

use pks_chain::{ChainError, StoreError};
use pks_crypto::CryptoError;
use pks_proto::ProtoError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("cannot associate sigchain: no keyring")]
    NoKeyring,

    #[error("cannot associate sigchain: no DEVICE SIGNING KEY")]
    NoDeviceSigningKey,

    #[error("cannot associate sigchain: no DEVICE ENCRYPTION KEY")]
    NoDeviceEncryptionKey,

    #[error("a sigchain is already associated - disassociate it before trying to associate a new one")]
    SigchainExists,

    #[error("cannot associate sigchain: no name or no id")]
    MissingIdentity,

    #[error("device signing key is locked")]
    LockedKey,

    #[error("home directory could not be determined")]
    NoHomeDir,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("Proto error: {0}")]
    Proto(#[from] ProtoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
