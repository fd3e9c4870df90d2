//! pks_chain — the signature chain and its backing stores.
//!
//! A sigchain is an append-only log of base64-encoded signed entries,
//! each linking to the SHA-256 of the previous stored line. Replay
//! verifies every link and rebuilds the device index; the first bad
//! entry poisons the chain for writes while the accepted prefix stays
//! readable.
//!
//! # Module layout
//! - `store`    — `Store` trait, in-memory and line-file variants, locator factory
//! - `sigchain` — replay, per-entry validation, device index, append helpers
//! - `error`    — store and chain error types

pub mod error;
pub mod sigchain;
pub mod store;

pub use error::{ChainError, StoreError};
pub use sigchain::{ChainFault, Device, SigChain, Validated};
pub use store::{create_store, FileStore, MemoryStore, Store};
