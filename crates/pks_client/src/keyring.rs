//! Key storage.
//!
//! A keyring maps a [`KeyKind`] to an ordered list of keys, newest last.
//! `lock`/`unlock` are hooks for hardened rings that keep private halves
//! as password-derived secretbox ciphertexts; the in-memory ring used
//! here holds plaintext key material per instance and treats both as
//! no-ops.

use std::collections::BTreeMap;

use zeroize::{Zeroize, ZeroizeOnDrop};

use pks_proto::KeyKind;

use crate::error::ClientError;

/// One key. The private half may be absent (locked or public-only) and
/// is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct Key {
    #[zeroize(skip)]
    pub kind: KeyKind,
    pub private: Option<Vec<u8>>,
    #[zeroize(skip)]
    pub public: Vec<u8>,
}

impl Key {
    pub fn new(kind: KeyKind, private: Option<Vec<u8>>, public: Vec<u8>) -> Self {
        Self {
            kind,
            private,
            public,
        }
    }
}

pub trait Keyring {
    fn get(&self, kind: KeyKind) -> Option<&[Key]>;

    fn set(&mut self, kind: KeyKind, keys: Vec<Key>);

    fn remove(&mut self, kind: KeyKind) -> Option<Vec<Key>>;

    fn kinds(&self) -> Vec<KeyKind>;

    /// Number of kinds with stored keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&mut self, password: &str) -> Result<(), ClientError>;

    fn unlock(&mut self, password: &str, count: usize) -> Result<(), ClientError>;
}

/// Plain in-memory ring. State is per instance.
#[derive(Default)]
pub struct InMemoryKeyring {
    keys: BTreeMap<KeyKind, Vec<Key>>,
}

impl InMemoryKeyring {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Keyring for InMemoryKeyring {
    fn get(&self, kind: KeyKind) -> Option<&[Key]> {
        self.keys.get(&kind).map(Vec::as_slice)
    }

    fn set(&mut self, kind: KeyKind, keys: Vec<Key>) {
        self.keys.insert(kind, keys);
    }

    fn remove(&mut self, kind: KeyKind) -> Option<Vec<Key>> {
        self.keys.remove(&kind)
    }

    fn kinds(&self) -> Vec<KeyKind> {
        self.keys.keys().copied().collect()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn lock(&mut self, _password: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn unlock(&mut self, _password: &str, _count: usize) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Factory for the in-memory ring, shaped for [`crate::Client::generate`].
pub fn in_memory_keyring() -> Box<dyn Keyring> {
    Box::new(InMemoryKeyring::new())
}
