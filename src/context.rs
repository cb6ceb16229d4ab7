//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;
use log::warn;

use crate::config::TodoConfig;
use crate::ids::MonotonicIds;
use crate::store::{store_publish, TodoStore};
use crate::storage::{BrowserStorage, MemoryStorage};
use crate::todo_list::{Persistence, TodoList};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Reactive snapshot of the controller state - read
    pub store: TodoStore,
    /// Controller owning the state, ids and storage
    controller: StoredValue<TodoList, LocalStorage>,
}

impl AppContext {
    pub fn new(list: TodoList) -> Self {
        let store = TodoStore::new(list.state().clone());
        Self {
            store,
            controller: StoredValue::new_local(list),
        }
    }

    /// Run one controller operation and publish the resulting state
    pub fn dispatch(&self, op: impl FnOnce(&mut TodoList)) {
        self.controller.update_value(op);
        let next = self.controller.with_value(|list| list.state().clone());
        store_publish(&self.store, next);
    }
}

/// Build the controller from config. Without local storage the list lives in memory only.
pub fn open_todo_list(config: &TodoConfig) -> TodoList {
    let persistence = config.persist.then(|| match BrowserStorage::local() {
        Ok(storage) => Persistence::new(storage, config.storage_key.clone()),
        Err(e) => {
            warn!("{}; items will not survive a reload", e);
            Persistence::new(MemoryStorage::new(), config.storage_key.clone())
        }
    });
    TodoList::initialize(persistence, MonotonicIds::browser_clock())
}
