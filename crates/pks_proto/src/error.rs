use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Entry shorter than a detached signature")]
    TruncatedEntry,

    #[error("Signing key does not match the entry authority")]
    AuthorityMismatch,
}
