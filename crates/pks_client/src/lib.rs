//! pks_client — the local client side of a PKS identity.
//!
//! A client owns a device identity (id + name), a keyring holding the
//! device's signing and encryption key material, and optionally a
//! sigchain it has associated. At rest the client metadata is protected
//! by a password-derived secretbox envelope.
//!
//! # Module layout
//! - `keyring`   — `Key`, the `Keyring` trait, and the in-memory ring
//! - `client`    — identity generation, chain association, the envelope
//! - `bootstrap` — load-or-create flow over the default client path
//! - `error`     — unified error type

pub mod bootstrap;
pub mod client;
pub mod error;
pub mod keyring;

pub use bootstrap::{bootstrap, DEFAULT_CLIENT_STORE, DEFAULT_DIR};
pub use client::{device_keys_from_seed, Client};
pub use error::ClientError;
pub use keyring::{in_memory_keyring, InMemoryKeyring, Key, Keyring};
