//! Shared key/value state for a single tree.
//!
//! Every node of one [`Tree`](crate::Tree) sees the same [`Blackboard`].
//! Values are type-erased and stored by string key; writes overwrite.
//! Sharing a blackboard between several trees is up to the caller, who
//! must namespace keys to avoid collisions.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;

use crate::error::{BlackboardError, Result};

type Value = Box<dyn Any + Send + Sync>;

/// Type-erased key/value store shared by the nodes of a tree.
#[derive(Default)]
pub struct Blackboard {
    entries: HashMap<String, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn set<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.entries.insert(key.into(), Box::new(value));
    }

    /// Returns a copy of the value stored under `key`, or `default` when the
    /// key is absent or holds a value of a different type.
    pub fn get<T>(&self, key: &str, default: T) -> T
    where
        T: Any + Clone,
    {
        self.get_ref::<T>(key).cloned().unwrap_or(default)
    }

    /// Borrows the value stored under `key` if it exists with type `T`.
    pub fn get_ref<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    /// Mutably borrows the value stored under `key` if it exists with type `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key)?.downcast_mut::<T>()
    }

    /// Borrows the value under `key`, distinguishing a missing key from a
    /// value of the wrong type.
    pub fn try_get<T: Any>(&self, key: &str) -> Result<&T> {
        let value = self.entries.get(key).ok_or_else(|| BlackboardError::Missing {
            key: key.to_owned(),
        })?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| BlackboardError::TypeMismatch {
                key: key.to_owned(),
                expected: type_name::<T>(),
            })
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes `key`, returning whether an entry existed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Blackboard").field("keys", &keys).finish()
    }
}
