// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key/value persistence seam.
//!
//! Viewports persist `{zoom, panX, panY}` as a JSON string under their
//! storage key; the comparison controller stores a decimal layout index.
//! [`MemoryStore`] backs tests and headless hosts, and `LocalStorage`
//! (feature `web`) backs browser hosts.
//!
//! Several surfaces usually share one store. Wrap it in `Rc<RefCell<_>>`;
//! that type implements [`StateStore`] too.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::StorageError;

/// String key/value storage.
pub trait StateStore {
    /// Reads `key`. `Ok(None)` means absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Writes `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Deletes `key`. Absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`StateStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose writes fail with [`StorageError::QuotaExceeded`].
    ///
    /// Reads still work, which mirrors a full browser storage area.
    #[must_use]
    pub fn full() -> Self {
        Self {
            entries: BTreeMap::new(),
            read_only: true,
        }
    }

    /// Inserts an entry directly, bypassing the quota check.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::QuotaExceeded);
        }
        self.entries.insert(key.into(), value.into());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: StateStore> StateStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.try_borrow()
            .map_err(|_| StorageError::Backend("store is mutably borrowed".into()))?
            .get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.try_borrow_mut()
            .map_err(|_| StorageError::Backend("store is already borrowed".into()))?
            .set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.try_borrow_mut()
            .map_err(|_| StorageError::Backend("store is already borrowed".into()))?
            .remove(key)
    }
}

#[cfg(feature = "web")]
pub use web::LocalStorage;

#[cfg(feature = "web")]
mod web {
    use super::StateStore;
    use crate::error::StorageError;

    /// The browser's `window.localStorage`.
    ///
    /// Looked up on every call so a host that gains storage access later (or
    /// loses it) is handled without rebuilding the viewport.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|window| window.local_storage().ok().flatten())
                .ok_or(StorageError::Unavailable)
        }
    }

    impl StateStore for LocalStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Self::storage()?
                .get_item(key)
                .map_err(|err| StorageError::Backend(format!("{err:?}")))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            // Browsers report a full storage area as a thrown DOMException.
            Self::storage()?
                .set_item(key, value)
                .map_err(|_| StorageError::QuotaExceeded)
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            Self::storage()?
                .remove_item(key)
                .map_err(|err| StorageError::Backend(format!("{err:?}")))
        }
    }
}
