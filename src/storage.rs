//! Persistence Collaborator
//!
//! Key-value storage abstraction plus the local-storage and in-memory backends.
//! The whole item list is the unit of persistence.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsValue;

use crate::error::{StorageError, StorageResult};
use crate::models::TodoItem;

/// Synchronous get/set by key
pub trait KeyValueStorage {
    /// Returns Ok(None) when the key has never been written
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Rc<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

// ========================
// Browser local storage
// ========================

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// Open `window.localStorage`
    pub fn local() -> StorageResult<Self> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Read(js_error(&e)))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage.get_item(key).map_err(|e| StorageError::Read(js_error(&e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage.set_item(key, value).map_err(|e| StorageError::Write(js_error(&e)))
    }
}

fn js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// ========================
// In-memory storage
// ========================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a single key
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ========================
// Item list codec
// ========================

/// Restore the saved list. Absent, unreadable or malformed data all yield an empty list.
pub fn load_items(storage: &dyn KeyValueStorage, key: &str) -> Vec<TodoItem> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("ignoring saved items under {:?}: {}", key, e);
            return Vec::new();
        }
    };

    // A stored `null` is treated like a missing key
    let items = match serde_json::from_str::<Option<Vec<TodoItem>>>(&raw) {
        Ok(items) => items.unwrap_or_default(),
        Err(e) => {
            warn!("ignoring malformed items under {:?}: {}", key, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let before = items.len();
    let items: Vec<TodoItem> = items.into_iter().filter(|item| seen.insert(item.id)).collect();
    if items.len() != before {
        warn!("dropped {} items with duplicate ids", before - items.len());
    }
    items
}

pub fn save_items(storage: &dyn KeyValueStorage, key: &str, items: &[TodoItem]) -> StorageResult<()> {
    let json = serde_json::to_string(items)?;
    storage.set(key, &json)?;
    debug!("saved {} items under {:?}", items.len(), key);
    Ok(())
}
