//! Key-hold set
//!
//! Keys pressed and not yet released. The context appends one `KeyHold` event
//! per entry at the end of every polling pass.

use std::collections::BTreeSet;

use super::keys::KeyCode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHoldSet {
    keys: BTreeSet<KeyCode>,
}

impl KeyHoldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the key was already held
    pub fn insert(&mut self, key: KeyCode) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: KeyCode) -> bool {
        self.keys.remove(&key)
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    /// Held keys in key-code order
    pub fn iter(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
