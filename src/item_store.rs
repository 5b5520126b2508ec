//! The ordered item list and its four mutations.
//!
//! Every mutation that changes the list is written through the
//! [`PersistenceMirror`] and then announced to subscribers. Calls that change
//! nothing (blank text, unknown id) neither write nor notify.

use log::{debug, warn};

use crate::app_response::AppResponse;
use crate::id_generator::IdGenerator;
use crate::persistence::{encode_items, PersistenceMirror};
use crate::todo_item::{normalize_text, TodoItem};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&[TodoItem])>;

pub struct ItemStore {
    items: Vec<TodoItem>,
    ids: IdGenerator,
    mirror: PersistenceMirror,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    last_persist_error: Option<AppResponse>,
}

impl ItemStore {
    /// Restores the list through `mirror` and writes it back once, so the slot
    /// always holds a valid document after startup.
    pub fn load(mirror: PersistenceMirror) -> Self {
        let items = mirror.load();
        let ids = IdGenerator::seeded_from(&items);

        let mut store = Self {
            items,
            ids,
            mirror,
            listeners: Vec::new(),
            next_subscription: 0,
            last_persist_error: None,
        };
        store.persist();
        store
    }

    /// Appends a new item with the trimmed text. Returns its id, or `None` for blank text.
    pub fn create(&mut self, raw_text: &str) -> Option<String> {
        let text = normalize_text(raw_text)?;
        let id = self.ids.next_id(&self.items);

        self.items.push(TodoItem::new(id.clone(), text));
        debug!("Created item {id}");
        self.commit_change();
        Some(id)
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);

        if self.items.len() == before {
            return false;
        }
        debug!("Deleted item {id}");
        self.commit_change();
        true
    }

    pub fn toggle_completed(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        item.completed = !item.completed;
        self.commit_change();
        true
    }

    /// Replaces the item's text with the trimmed `raw_text`.
    ///
    /// Blank text never clears an item, and renaming to the current text is
    /// not a change. Returns whether the list changed.
    pub fn rename(&mut self, id: &str, raw_text: &str) -> bool {
        let Some(text) = normalize_text(raw_text) else {
            return false;
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return false;
        };
        if item.text == text {
            return false;
        }
        item.text = text.to_string();
        self.commit_change();
        true
    }

    /// Removes every item. Returns whether the list had any.
    pub fn clear_all(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        debug!("Cleared {} items", self.items.len());
        self.items.clear();
        self.commit_change();
        true
    }

    /// Wipes the backing storage and starts over with an empty list.
    ///
    /// Unlike the list mutations this can fail, when the storage cannot be
    /// recreated; the in-memory list is left untouched in that case.
    pub fn reset(&mut self) -> Result<(), AppResponse> {
        self.mirror.reset()?;
        self.items.clear();
        self.ids = IdGenerator::new();
        self.commit_change();
        Ok(())
    }

    /// Registers `listener`, called with the new list after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[TodoItem]) + 'static,
    {
        self.next_subscription += 1;
        let id = self.next_subscription;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    /// The list in its stored document form.
    pub fn to_json(&self) -> Result<String, AppResponse> {
        encode_items(&self.items)
    }

    /// Error from the most recent save, cleared by the next successful one.
    pub fn last_persist_error(&self) -> Option<&AppResponse> {
        self.last_persist_error.as_ref()
    }

    pub fn close(&mut self) -> Result<(), AppResponse> {
        self.mirror.close()
    }

    fn commit_change(&mut self) {
        self.persist();
        for (_, listener) in self.listeners.iter_mut() {
            listener(self.items.as_slice());
        }
    }

    fn persist(&mut self) {
        match self.mirror.save(&self.items) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!("Failed to persist list to '{}': {e}", self.mirror.key());
                self.last_persist_error = Some(e);
            }
        }
    }
}
