//! pks_proto — statement and entry types for the signature chain.
//!
//! An `Entry` wraps a `Statement` with the signing `AuthorityRecord`, the
//! hash of the previous stored entry, and a sequence number. Entries are
//! signed over their canonical JSON form and stored as
//! `base64(signature || json)` — see `canonical` for why the JSON bytes
//! must never drift.
//!
//! # Module layout
//! - `canonical` — byte-stable JSON emitter (the portability hazard)
//! - `statement` — `AddDevice` / `SignedKid` sum type
//! - `entry`     — `Entry`, `AuthorityRecord`, signed encoding/decoding
//! - `key_kind`  — key classification shared by keyring and chain
//! - `error`     — unified error type

pub mod canonical;
pub mod entry;
pub mod error;
pub mod key_kind;
pub mod statement;

pub use entry::{AuthorityRecord, DecodedEntry, Entry, GENESIS_PREV};
pub use error::ProtoError;
pub use key_kind::KeyKind;
pub use statement::{AddDevice, SignedKid, Statement};
