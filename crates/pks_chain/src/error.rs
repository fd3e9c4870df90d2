use thiserror::Error;

use pks_crypto::CryptoError;
use pks_proto::ProtoError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported store location: {0}")]
    UnsupportedStore(String),
}

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Entry decode error: {0}")]
    Proto(#[from] ProtoError),

    #[error("Authority kid is not valid hex: {0}")]
    MalformedKid(#[from] hex::FromHexError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
