//! Id source for new items.
//!
//! Ids are decimal millisecond timestamps, the format lists written by the
//! browser widget already use, but the generator never hands out the same value
//! twice: when the clock has not advanced since the last id it moves one past it.
//! Once the counter runs out of room it reuses the smallest free number instead.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::todo_item::TodoItem;

#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: u128,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the generator past every numeric id already in `items`.
    ///
    /// `u128::MAX` leaves no room above it and is not used as a seed.
    pub fn seeded_from(items: &[TodoItem]) -> Self {
        let last = items
            .iter()
            .filter_map(|item| item.id.parse::<u128>().ok())
            .filter(|&value| value < u128::MAX)
            .max()
            .unwrap_or(0);
        Self { last }
    }

    /// Returns an id not present in `items`, greater than any id this
    /// generator returned before while the counter has room.
    pub fn next_id(&mut self, items: &[TodoItem]) -> String {
        self.next_id_at(now_millis(), items)
    }

    pub(crate) fn next_id_at(&mut self, now: u128, items: &[TodoItem]) -> String {
        let taken: HashSet<&str> = items.iter().map(|item| item.id.as_str()).collect();

        let mut candidate = self.last.checked_add(1).map(|next| now.max(next));
        while let Some(value) = candidate {
            let id = value.to_string();
            if !taken.contains(id.as_str()) {
                self.last = value;
                return id;
            }
            candidate = value.checked_add(1);
        }

        // n items leave at least one of 0..=n free.
        (0..=items.len() as u128)
            .map(|value| value.to_string())
            .find(|id| !taken.contains(id.as_str()))
            .unwrap_or_default()
    }
}

fn now_millis() -> u128 {
    // A clock before the epoch falls back to the counter alone.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
