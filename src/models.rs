//! Frontend Models
//!
//! Data structures persisted to local storage.

use serde::{Deserialize, Serialize};

/// Unique, strictly increasing item identifier
pub type TodoId = u64;

/// A single to-do item (field names are the stored JSON keys)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl TodoItem {
    /// Create a new, not yet completed item
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Item currently in inline-edit mode, with its uncommitted title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TodoId,
    pub title: String,
}
