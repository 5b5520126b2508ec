//! The single in-progress rename.

use log::{debug, info};

use crate::item_store::ItemStore;
use crate::todo_item::{normalize_text, TodoItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { target_id: String, draft_text: String },
}

/// What [`EditSession::commit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// No edit was active.
    NotEditing,
    /// The draft is blank; the session stays open.
    BlankDraft,
    /// The draft was applied and the session closed.
    Committed,
    /// The target item no longer exists; the draft was dropped.
    Discarded,
}

impl EditSession {
    /// Starts editing `item`, seeding the draft with its text. Replaces any edit in progress.
    pub fn begin(&mut self, item: &TodoItem) {
        *self = EditSession::Editing {
            target_id: item.id.clone(),
            draft_text: item.text.clone(),
        };
    }

    /// Replaces the draft. Any text is accepted, including empty. Ignored when idle.
    pub fn update_draft(&mut self, text: &str) -> bool {
        match self {
            EditSession::Editing { draft_text, .. } => {
                *draft_text = text.to_string();
                true
            }
            EditSession::Idle => false,
        }
    }

    /// Applies a non-blank draft to `store` and returns to idle.
    pub fn commit(&mut self, store: &mut ItemStore) -> CommitOutcome {
        let EditSession::Editing { target_id, draft_text } = &*self else {
            return CommitOutcome::NotEditing;
        };

        if normalize_text(draft_text).is_none() {
            return CommitOutcome::BlankDraft;
        }

        if !store.contains(target_id) {
            info!("Dropping edit of removed item {target_id}");
            *self = EditSession::Idle;
            return CommitOutcome::Discarded;
        }

        store.rename(target_id, draft_text);
        debug!("Committed edit of {target_id}");
        *self = EditSession::Idle;
        CommitOutcome::Committed
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    /// Closes the session if its target is not in `store`. Returns whether it did.
    pub fn clear_if_missing(&mut self, store: &ItemStore) -> bool {
        let Some(target_id) = self.target_id() else {
            return false;
        };
        if store.contains(target_id) {
            return false;
        }
        info!("Edit target {target_id} was deleted, closing edit");
        *self = EditSession::Idle;
        true
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn target_id(&self) -> Option<&str> {
        match self {
            EditSession::Editing { target_id, .. } => Some(target_id),
            EditSession::Idle => None,
        }
    }

    /// The pending text, empty when idle.
    pub fn draft_text(&self) -> &str {
        match self {
            EditSession::Editing { draft_text, .. } => draft_text,
            EditSession::Idle => "",
        }
    }
}
