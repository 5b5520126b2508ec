//! The owned list state driven by a rendering layer.
//!
//! [`TodoList`] pairs an [`ItemStore`] with an [`EditSession`] and exposes the
//! operations a UI binds its gestures to. None of the list operations fail:
//! blank text and unknown ids are no-ops.
//!
//! ```rust
//! use todo_list_core::slot_storage::InMemorySlot;
//! use todo_list_core::todo_list::TodoList;
//!
//! let mut list = TodoList::with_storage(Box::new(InMemorySlot::new()), "todos");
//! let id = list.create("  buy milk ").expect("non-blank text creates an item");
//! list.toggle(&id);
//!
//! assert_eq!(list.items()[0].text, "buy milk");
//! assert!(list.items()[0].completed);
//! ```

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::config::TodoListConfig;
use crate::edit_session::{CommitOutcome, EditSession};
use crate::item_store::{ItemStore, SubscriptionId};
use crate::local_db_state::AppDbState;
use crate::persistence::PersistenceMirror;
use crate::slot_storage::SlotStorage;
use crate::todo_item::TodoItem;

/// What a renderer needs to draw the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub items: Vec<TodoItem>,
    pub editing_id: Option<String>,
    pub draft_text: String,
}

pub struct TodoList {
    store: ItemStore,
    session: EditSession,
}

impl TodoList {
    /// Opens the LMDB-backed list described by `config`.
    pub fn open(config: &TodoListConfig) -> Result<Self, AppResponse> {
        let db = AppDbState::init_with_config(config)?;
        Ok(Self::with_storage(Box::new(db), config.storage_key.clone()))
    }

    /// Loads the list stored under `key` in `storage`.
    pub fn with_storage(storage: Box<dyn SlotStorage>, key: impl Into<String>) -> Self {
        let mirror = PersistenceMirror::new(storage, key);
        Self {
            store: ItemStore::load(mirror),
            session: EditSession::default(),
        }
    }

    pub fn create(&mut self, text: &str) -> Option<String> {
        self.store.create(text)
    }

    /// Deletes the item, closing the edit session if it targeted that item.
    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.store.delete(id);
        self.session.clear_if_missing(&self.store);
        removed
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.store.toggle_completed(id)
    }

    pub fn rename(&mut self, id: &str, text: &str) -> bool {
        self.store.rename(id, text)
    }

    /// Removes every item and closes any edit in progress.
    pub fn clear_all(&mut self) -> bool {
        self.session.cancel();
        self.store.clear_all()
    }

    /// Wipes the storage and starts an empty list.
    pub fn reset(&mut self) -> Result<(), AppResponse> {
        self.session.cancel();
        self.store.reset()
    }

    /// Starts renaming `id`. Unknown ids leave the session untouched.
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Some(item) => {
                self.session.begin(item);
                true
            }
            None => false,
        }
    }

    pub fn update_draft(&mut self, text: &str) -> bool {
        self.session.update_draft(text)
    }

    pub fn commit_edit(&mut self) -> CommitOutcome {
        self.session.commit(&mut self.store)
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[TodoItem]) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn items(&self) -> &[TodoItem] {
        self.store.items()
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.store.get(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn remaining_count(&self) -> usize {
        self.store.remaining_count()
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.session.target_id()
    }

    pub fn draft_text(&self) -> &str {
        self.session.draft_text()
    }

    pub fn to_json(&self) -> Result<String, AppResponse> {
        self.store.to_json()
    }

    pub fn last_persist_error(&self) -> Option<&AppResponse> {
        self.store.last_persist_error()
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            items: self.store.items().to_vec(),
            editing_id: self.session.target_id().map(str::to_string),
            draft_text: self.session.draft_text().to_string(),
        }
    }

    /// Releases the storage handle. The in-memory list stays readable.
    pub fn close(&mut self) -> Result<(), AppResponse> {
        self.session.cancel();
        self.store.close()
    }
}
