//! Load-once / save-on-change bridge between the item list and its slot.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::app_response::AppResponse;
use crate::slot_storage::SlotStorage;
use crate::todo_item::TodoItem;

pub struct PersistenceMirror {
    storage: Box<dyn SlotStorage>,
    key: String,
}

impl PersistenceMirror {
    pub fn new(storage: Box<dyn SlotStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restores the stored list.
    ///
    /// Never fails: a missing slot, a read error or a document of the wrong
    /// shape all yield an empty list.
    pub fn load(&self) -> Vec<TodoItem> {
        let document = match self.storage.read_slot(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => {
                info!("No stored list under '{}', starting empty", self.key);
                return Vec::new();
            }
            Err(e) => {
                warn!("Could not read slot '{}', starting empty: {e}", self.key);
                return Vec::new();
            }
        };

        match decode_items(&document) {
            Ok(items) => {
                info!("Restored {} items from '{}'", items.len(), self.key);
                items
            }
            Err(e) => {
                warn!("Discarding unreadable list in '{}': {e}", self.key);
                Vec::new()
            }
        }
    }

    /// Writes the whole list, replacing whatever the slot held.
    pub fn save(&mut self, items: &[TodoItem]) -> Result<(), AppResponse> {
        let document = encode_items(items)?;
        self.storage.write_slot(&self.key, &document)?;
        debug!("Saved {} items to '{}'", items.len(), self.key);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), AppResponse> {
        self.storage.reset(&self.key)?;
        info!("Reset storage behind '{}'", self.key);
        Ok(())
    }

    pub fn close(&mut self) -> Result<(), AppResponse> {
        self.storage.close()
    }
}

pub fn encode_items(items: &[TodoItem]) -> Result<String, AppResponse> {
    Ok(serde_json::to_string(items)?)
}

/// Parses a stored document. Later records repeating an earlier id are dropped.
pub fn decode_items(document: &str) -> Result<Vec<TodoItem>, AppResponse> {
    let parsed: Vec<TodoItem> = serde_json::from_str(document)?;

    let mut seen = HashSet::with_capacity(parsed.len());
    let total = parsed.len();
    let items: Vec<TodoItem> = parsed
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    if items.len() != total {
        warn!("Dropped {} items with duplicate ids", total - items.len());
    }
    Ok(items)
}
