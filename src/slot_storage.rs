//! Backends for the named slot a list is mirrored into.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::app_response::AppResponse;
use crate::local_db_state::AppDbState;

/// A durable key-value slot holding one whole document per key.
pub trait SlotStorage {
    /// Returns the document under `key`, `None` when nothing was ever written.
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse>;

    /// Replaces the document under `key`.
    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse>;

    /// Removes `key`, returning whether it was present.
    fn clear_slot(&mut self, key: &str) -> Result<bool, AppResponse>;

    /// Drops everything stored for `key` and leaves the backend ready for writes.
    fn reset(&mut self, key: &str) -> Result<(), AppResponse> {
        self.clear_slot(key).map(|_| ())
    }

    /// Releases the underlying handle.
    fn close(&mut self) -> Result<(), AppResponse> {
        Ok(())
    }
}

impl SlotStorage for AppDbState {
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        AppDbState::read_slot(self, key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        AppDbState::write_slot(self, key, value)
    }

    fn clear_slot(&mut self, key: &str) -> Result<bool, AppResponse> {
        AppDbState::clear_slot(self, key)
    }

    /// Recreates the whole environment under its current name.
    fn reset(&mut self, _key: &str) -> Result<(), AppResponse> {
        let name = self.db_name().to_string();
        self.reset_database(&name)
    }

    fn close(&mut self) -> Result<(), AppResponse> {
        self.close_database()
    }
}

#[derive(Default)]
struct SlotMap {
    slots: HashMap<String, String>,
    writes: usize,
}

/// HashMap-backed slots for tests and hosts that persist elsewhere.
///
/// Clones share the same map, so a caller can keep a handle and inspect what
/// a list wrote after moving the storage into it.
#[derive(Clone, Default)]
pub struct InMemorySlot {
    inner: Arc<RwLock<SlotMap>>,
}

impl InMemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `value` already stored under `key`.
    pub fn with_document(key: &str, value: &str) -> Self {
        let slot = Self::new();
        if let Ok(mut map) = slot.inner.write() {
            map.slots.insert(key.to_string(), value.to_string());
        }
        slot
    }

    /// Number of successful `write_slot` calls so far.
    pub fn writes(&self) -> usize {
        self.inner.read().map(|map| map.writes).unwrap_or(0)
    }

    pub fn document(&self, key: &str) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|map| map.slots.get(key).cloned())
    }
}

fn poisoned() -> AppResponse {
    AppResponse::DatabaseError("in-memory slot lock poisoned".to_string())
}

impl SlotStorage for InMemorySlot {
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.slots.insert(key.to_string(), value.to_string());
        map.writes += 1;
        Ok(())
    }

    fn clear_slot(&mut self, key: &str) -> Result<bool, AppResponse> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.slots.remove(key).is_some())
    }
}

/// Browser `localStorage`, for wasm builds.
#[cfg(feature = "web-storage")]
pub struct WebLocalStorage {
    storage: web_sys::Storage,
}

#[cfg(feature = "web-storage")]
impl WebLocalStorage {
    pub fn from_window() -> Result<Self, AppResponse> {
        let window = web_sys::window()
            .ok_or_else(|| AppResponse::DatabaseError("No window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AppResponse::DatabaseError(format!("localStorage unavailable: {e:?}")))?
            .ok_or_else(|| AppResponse::DatabaseError("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(feature = "web-storage")]
impl SlotStorage for WebLocalStorage {
    fn read_slot(&self, key: &str) -> Result<Option<String>, AppResponse> {
        self.storage
            .get_item(key)
            .map_err(|e| AppResponse::DatabaseError(format!("localStorage read failed: {e:?}")))
    }

    fn write_slot(&mut self, key: &str, value: &str) -> Result<(), AppResponse> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AppResponse::DatabaseError(format!("localStorage write failed: {e:?}")))
    }

    fn clear_slot(&mut self, key: &str) -> Result<bool, AppResponse> {
        let existed = self.read_slot(key)?.is_some();
        self.storage
            .remove_item(key)
            .map_err(|e| AppResponse::DatabaseError(format!("localStorage remove failed: {e:?}")))?;
        Ok(existed)
    }
}
