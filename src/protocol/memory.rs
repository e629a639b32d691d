// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-process state store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::StateStore;
use crate::state::{StorePath, StoreWrite};

/// A [`StateStore`] held in memory.
///
/// Clones share the same contents. Successful writes are recorded in order,
/// and individual paths can be made to fail to exercise error reporting.
///
/// # Examples
///
/// ```
/// use voxlight::protocol::{MemoryStore, StateStore};
/// use voxlight::state::{StorePath, StoreWrite};
///
/// # async fn example() -> Result<(), voxlight::ProtocolError> {
/// let store = MemoryStore::new();
/// store.set(&StoreWrite::led_enabled(true)).await?;
/// assert_eq!(store.value(StorePath::LedEnabled), Some(serde_json::json!(true)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<StorePath, Value>,
    log: Vec<StoreWrite>,
    failing: HashSet<StorePath>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value directly, as another client (or the device) would.
    pub fn insert(&self, path: StorePath, value: Value) {
        self.inner.lock().values.insert(path, value);
    }

    /// Returns the value currently stored at `path`.
    #[must_use]
    pub fn value(&self, path: StorePath) -> Option<Value> {
        self.inner.lock().values.get(&path).cloned()
    }

    /// Returns every successful write made through [`StateStore::set`], oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.inner.lock().log.clone()
    }

    /// Makes reads and writes of `path` fail until [`Self::heal_path`] is called.
    pub fn fail_path(&self, path: StorePath) {
        self.inner.lock().failing.insert(path);
    }

    /// Undoes [`Self::fail_path`].
    pub fn heal_path(&self, path: StorePath) {
        self.inner.lock().failing.remove(&path);
    }
}

impl StateStore for MemoryStore {
    async fn get(&self, path: StorePath) -> Result<Option<Value>, ProtocolError> {
        let inner = self.inner.lock();
        if inner.failing.contains(&path) {
            return Err(ProtocolError::ConnectionFailed(format!(
                "read of {path} rejected"
            )));
        }
        Ok(inner.values.get(&path).cloned())
    }

    async fn set(&self, write: &StoreWrite) -> Result<(), ProtocolError> {
        let mut inner = self.inner.lock();
        let path = write.path();
        if inner.failing.contains(&path) {
            return Err(ProtocolError::ConnectionFailed(format!(
                "write to {path} rejected"
            )));
        }
        inner.values.insert(path, write.value().clone());
        inner.log.push(write.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RgbColor;
    use serde_json::json;

    #[tokio::test]
    async fn set_then_get() {
        let store = MemoryStore::new();
        store.set(&StoreWrite::lcd_enabled(true)).await.unwrap();
        let value = store.get(StorePath::LcdEnabled).await.unwrap();
        assert_eq!(value, Some(json!(true)));
        assert_eq!(store.writes(), vec![StoreWrite::lcd_enabled(true)]);
    }

    #[tokio::test]
    async fn missing_value_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(StorePath::SensorLux).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_path() {
        let store = MemoryStore::new();
        store.fail_path(StorePath::Rgb);

        // Other paths are unaffected.
        assert!(store.set(&StoreWrite::led_enabled(true)).await.is_ok());

        let white = StoreWrite::rgb(RgbColor::white());
        let result = store.set(&white).await;
        assert!(matches!(result, Err(ProtocolError::ConnectionFailed(_))));
        assert_eq!(store.value(StorePath::Rgb), None);
        assert_eq!(store.writes(), vec![StoreWrite::led_enabled(true)]);

        store.heal_path(StorePath::Rgb);
        assert!(store.set(&white).await.is_ok());
    }

    #[test]
    fn clones_share_contents() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.insert(StorePath::SensorLux, json!(321));
        assert_eq!(store.value(StorePath::SensorLux), Some(json!(321)));
    }
}
