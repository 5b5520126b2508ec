//! The persisted list entry.
//!
//! [`TodoItem`] is the only record that reaches durable storage. Its serde
//! field names are the document format: a stored list is a JSON array of
//! `{"id": string, "text": string, "completed": bool}` objects, in display order.

use serde::{Deserialize, Serialize};

/// One entry of the todo list.
///
/// # Examples
///
/// ```rust
/// use todo_list_core::todo_item::TodoItem;
///
/// let item = TodoItem::new("1718000000000", "buy milk");
/// assert!(!item.completed);
///
/// let json = serde_json::to_string(&item)?;
/// assert_eq!(json, r#"{"id":"1718000000000","text":"buy milk","completed":false}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Opaque identifier, unique within the list and stable for the item's lifetime.
    pub id: String,

    /// Trimmed, non-empty text once created or renamed.
    pub text: String,

    /// Completion flag, `false` on creation.
    pub completed: bool,
}

impl TodoItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Trims user input, returning `None` when nothing is left.
pub(crate) fn normalize_text(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
