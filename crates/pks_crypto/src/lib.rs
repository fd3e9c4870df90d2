//! pks_crypto — cryptographic primitives for the PKS identity manager
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Key material is wrapped in opaque types that never derive
//!   `Serialize` or `Clone`.
//!
//! All primitives follow NaCl/libsodium semantics because the encrypted
//! client envelope and the chain entry format are fixed: Ed25519 for
//! signing, X25519 for DH keys, Argon2i for the password KDF,
//! XSalsa20-Poly1305 for the authenticated secret box.
//!
//! # Module layout
//! - `sign`      — Ed25519 signing keypairs + detached verification
//! - `dh`        — X25519 encryption keypairs
//! - `kdf`       — Argon2i password key derivation
//! - `derive`    — HMAC-SHA256 domain-separated seed derivation
//! - `secretbox` — XSalsa20-Poly1305 encrypt/decrypt
//! - `rand`      — CSPRNG helpers
//! - `error`     — unified error type

pub mod derive;
pub mod dh;
pub mod error;
pub mod kdf;
pub mod rand;
pub mod secretbox;
pub mod sign;

pub use error::CryptoError;
