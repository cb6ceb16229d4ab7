//! To-Do List Controller
//!
//! `TodoState` is a plain value; each transition consumes it and returns the next one.
//! `TodoList` owns the current state together with the id source and the optional
//! persistence collaborator, and writes the item list out whenever it changes.

use log::{error, info, trace, warn};
use reactive_stores::Store;

use crate::ids::{IdSource, MonotonicIds};
use crate::models::{EditDraft, TodoId, TodoItem};
use crate::storage::{load_items, save_items, KeyValueStorage};

/// Key identifier that submits the new-item input
pub const ENTER_KEY: &str = "Enter";

/// Complete UI state of the list
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct TodoState {
    /// Items in display (insertion) order
    pub items: Vec<TodoItem>,
    /// Text staged in the new-item input
    pub draft_text: String,
    /// Item being edited inline, if any
    pub editing: Option<EditDraft>,
    /// Whether the "clear all" confirmation is showing
    pub confirm_clear_visible: bool,
}

impl TodoState {
    pub fn with_items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing.as_ref().is_some_and(|draft| draft.id == id)
    }

    pub fn set_draft_text(self, text: String) -> Self {
        Self { draft_text: text, ..self }
    }

    /// Empty drafts are rejected; whitespace-only text is a valid title.
    /// With no id left the draft stays in place and nothing is added.
    pub fn add_todo(mut self, ids: &mut dyn IdSource) -> Self {
        if self.draft_text.is_empty() {
            return self;
        }
        let Some(id) = ids.next_id() else {
            warn!("no item ids left; {:?} was not added", self.draft_text);
            return self;
        };
        let title = std::mem::take(&mut self.draft_text);
        self.items.push(TodoItem::new(id, title));
        self
    }

    pub fn submit_on_enter_key(self, key: &str, ids: &mut dyn IdSource) -> Self {
        if key == ENTER_KEY {
            self.add_todo(ids)
        } else {
            self
        }
    }

    pub fn toggle_completed(mut self, id: TodoId) -> Self {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.completed = !item.completed;
        }
        self
    }

    pub fn remove_todo(mut self, id: TodoId) -> Self {
        self.items.retain(|item| item.id != id);
        if self.is_editing(id) {
            self.editing = None;
        }
        self
    }

    /// Replaces any edit already in progress. Unknown ids are ignored.
    pub fn start_edit(self, id: TodoId, current_title: String) -> Self {
        if !self.contains(id) {
            return self;
        }
        Self {
            editing: Some(EditDraft { id, title: current_title }),
            ..self
        }
    }

    pub fn set_edit_draft_title(mut self, text: String) -> Self {
        if let Some(draft) = self.editing.as_mut() {
            draft.title = text;
        }
        self
    }

    /// Commits the draft title, even when it is empty.
    pub fn save_edit(mut self, id: TodoId) -> Self {
        if !self.is_editing(id) {
            return self;
        }
        if let Some(draft) = self.editing.take() {
            if let Some(item) = self.items.iter_mut().find(|item| item.id == draft.id) {
                item.title = draft.title;
            }
        }
        self
    }

    pub fn cancel_edit(self) -> Self {
        Self { editing: None, ..self }
    }

    /// Nothing to confirm on an empty list.
    pub fn request_clear_all(self) -> Self {
        if self.items.is_empty() {
            return self;
        }
        Self {
            confirm_clear_visible: true,
            ..self
        }
    }

    pub fn cancel_clear_all(self) -> Self {
        Self {
            confirm_clear_visible: false,
            ..self
        }
    }

    pub fn confirm_clear_all(self) -> Self {
        Self {
            items: Vec::new(),
            editing: None,
            confirm_clear_visible: false,
            ..self
        }
    }
}

/// Where the item list is saved
pub struct Persistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl Persistence {
    pub fn new(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }
}

/// Stateful controller driving `TodoState` transitions
pub struct TodoList {
    state: TodoState,
    ids: MonotonicIds,
    persistence: Option<Persistence>,
}

impl TodoList {
    /// Restore saved items (or start empty) and write the normalized list back.
    pub fn initialize(persistence: Option<Persistence>, ids: MonotonicIds) -> Self {
        let items = match &persistence {
            Some(p) => load_items(p.storage.as_ref(), &p.key),
            None => Vec::new(),
        };
        info!(
            "todo list initialized with {} items (persistence {})",
            items.len(),
            if persistence.is_some() { "on" } else { "off" }
        );

        let list = Self {
            ids: ids.seeded_from(&items),
            state: TodoState::with_items(items),
            persistence,
        };
        list.persist();
        list
    }

    pub fn state(&self) -> &TodoState {
        &self.state
    }

    pub fn set_draft_text(&mut self, text: String) {
        self.apply_ui("set_draft_text", |state| state.set_draft_text(text));
    }

    pub fn add_todo(&mut self) {
        self.apply("add_todo", |state, ids| state.add_todo(ids));
    }

    pub fn submit_on_enter_key(&mut self, key: &str) {
        self.apply("submit_on_enter_key", |state, ids| state.submit_on_enter_key(key, ids));
    }

    pub fn toggle_completed(&mut self, id: TodoId) {
        self.apply("toggle_completed", |state, _| state.toggle_completed(id));
    }

    pub fn remove_todo(&mut self, id: TodoId) {
        self.apply("remove_todo", |state, _| state.remove_todo(id));
    }

    pub fn start_edit(&mut self, id: TodoId, current_title: String) {
        self.apply_ui("start_edit", |state| state.start_edit(id, current_title));
    }

    pub fn set_edit_draft_title(&mut self, text: String) {
        self.apply_ui("set_edit_draft_title", |state| state.set_edit_draft_title(text));
    }

    pub fn save_edit(&mut self, id: TodoId) {
        self.apply("save_edit", |state, _| state.save_edit(id));
    }

    pub fn cancel_edit(&mut self) {
        self.apply_ui("cancel_edit", |state| state.cancel_edit());
    }

    pub fn request_clear_all(&mut self) {
        self.apply_ui("request_clear_all", |state| state.request_clear_all());
    }

    pub fn cancel_clear_all(&mut self) {
        self.apply_ui("cancel_clear_all", |state| state.cancel_clear_all());
    }

    pub fn confirm_clear_all(&mut self) {
        self.apply("confirm_clear_all", |state, _| state.confirm_clear_all());
    }

    /// Transitions that leave `items` alone: no comparison, no write.
    fn apply_ui(&mut self, op: &str, transition: impl FnOnce(TodoState) -> TodoState) {
        self.state = transition(std::mem::take(&mut self.state));
        trace!("{}: items untouched", op);
    }

    /// Transitions that may change `items`; the list is saved only if it did.
    fn apply(&mut self, op: &str, transition: impl FnOnce(TodoState, &mut MonotonicIds) -> TodoState) {
        let previous = std::mem::take(&mut self.state);
        let items_before = previous.items.clone();
        self.state = transition(previous, &mut self.ids);

        if self.state.items != items_before {
            trace!("{}: items changed, {} now", op, self.state.items.len());
            self.persist();
        } else {
            trace!("{}: items unchanged", op);
        }
    }

    /// Save failures are logged and the in-memory state is kept.
    fn persist(&self) {
        let Some(p) = &self.persistence else { return };
        if let Err(e) = save_items(p.storage.as_ref(), &p.key, &self.state.items) {
            error!("failed to persist items under {:?}: {}", p.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::MemoryStorage;
    use std::cell::Cell;
    use std::rc::Rc;

    const KEY: &str = "todos";

    fn fixed_ids() -> MonotonicIds {
        MonotonicIds::new(|| 1_000)
    }

    fn setup_list() -> (TodoList, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let list = TodoList::initialize(Some(Persistence::new(storage.clone(), KEY)), fixed_ids());
        (list, storage)
    }

    fn add(list: &mut TodoList, title: &str) -> TodoId {
        list.set_draft_text(title.to_string());
        list.add_todo();
        list.state().items.last().map(|item| item.id).unwrap()
    }

    fn titles(list: &TodoList) -> Vec<&str> {
        list.state().items.iter().map(|item| item.title.as_str()).collect()
    }

    fn saved(storage: &MemoryStorage) -> Vec<TodoItem> {
        load_items(storage, KEY)
    }

    /// In-memory storage that counts writes
    struct Counting {
        inner: MemoryStorage,
        writes: Rc<Cell<u32>>,
    }

    impl KeyValueStorage for Counting {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get(key)
        }
        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            self.writes.set(self.writes.get() + 1);
            self.inner.set(key, value)
        }
    }

    fn setup_counting(inner: MemoryStorage) -> (TodoList, Rc<Cell<u32>>) {
        let writes = Rc::new(Cell::new(0));
        let storage = Counting { inner, writes: writes.clone() };
        let list = TodoList::initialize(Some(Persistence::new(storage, KEY)), fixed_ids());
        (list, writes)
    }

    #[test]
    fn test_initialize_empty_writes_empty_list() {
        let (list, storage) = setup_list();
        assert!(list.state().items.is_empty());
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_initialize_malformed_falls_back_to_empty() {
        let storage = Rc::new(MemoryStorage::with_entry(KEY, "{broken"));
        let list = TodoList::initialize(Some(Persistence::new(storage.clone(), KEY)), fixed_ids());

        assert!(list.state().items.is_empty());
        assert_eq!(storage.get(KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_add_in_submission_order() {
        let (mut list, _) = setup_list();
        for title in ["one", "two", "three"] {
            add(&mut list, title);
        }
        assert_eq!(titles(&list), vec!["one", "two", "three"]);
        assert!(list.state().items.iter().all(|item| !item.completed));
        assert!(list.state().draft_text.is_empty());
    }

    #[test]
    fn test_add_empty_draft_is_rejected() {
        let (mut list, _) = setup_list();
        add(&mut list, "A");
        list.set_draft_text(String::new());
        list.add_todo();
        assert_eq!(list.state().items.len(), 1);
    }

    #[test]
    fn test_add_whitespace_only_is_accepted() {
        let (mut list, _) = setup_list();
        list.set_draft_text("   ".to_string());
        list.add_todo();
        assert_eq!(titles(&list), vec!["   "]);
    }

    #[test]
    fn test_draft_text_is_kept_verbatim() {
        let (mut list, _) = setup_list();
        list.set_draft_text("  padded  ".to_string());
        assert_eq!(list.state().draft_text, "  padded  ");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let (mut list, _) = setup_list();
        let a = add(&mut list, "A");
        let b = add(&mut list, "B");
        assert!(b > a);
    }

    #[test]
    fn test_enter_key_submits() {
        let (mut list, _) = setup_list();
        list.set_draft_text("Via enter".to_string());
        list.submit_on_enter_key("a");
        list.submit_on_enter_key("Shift");
        assert!(list.state().items.is_empty());

        list.submit_on_enter_key(ENTER_KEY);
        assert_eq!(titles(&list), vec!["Via enter"]);
        assert!(list.state().draft_text.is_empty());
    }

    #[test]
    fn test_toggle_is_involution() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.toggle_completed(id);
        assert!(list.state().items[0].completed);
        list.toggle_completed(id);
        assert!(!list.state().items[0].completed);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let (mut list, _) = setup_list();
        add(&mut list, "A");
        let before = list.state().clone();

        list.toggle_completed(42);
        list.remove_todo(42);
        list.save_edit(42);
        list.start_edit(42, "ghost".to_string());

        assert_eq!(list.state(), &before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut list, _) = setup_list();
        let a = add(&mut list, "A");
        add(&mut list, "B");

        list.remove_todo(a);
        let once = list.state().clone();
        list.remove_todo(a);
        assert_eq!(list.state(), &once);
        assert_eq!(titles(&list), vec!["B"]);
    }

    #[test]
    fn test_remove_edited_item_resets_editing() {
        let (mut list, _) = setup_list();
        let a = add(&mut list, "A");
        let b = add(&mut list, "B");

        list.start_edit(b, "B".to_string());
        list.remove_todo(a);
        assert!(list.state().is_editing(b));

        list.remove_todo(b);
        assert_eq!(list.state().editing, None);
    }

    #[test]
    fn test_start_edit_overwrites_previous_edit() {
        let (mut list, _) = setup_list();
        let a = add(&mut list, "A");
        let b = add(&mut list, "B");

        list.start_edit(a, "A".to_string());
        list.set_edit_draft_title("A2".to_string());
        list.start_edit(b, "B".to_string());

        assert_eq!(list.state().editing, Some(EditDraft { id: b, title: "B".to_string() }));
    }

    #[test]
    fn test_edit_draft_requires_editing() {
        let (mut list, _) = setup_list();
        add(&mut list, "A");
        list.set_edit_draft_title("ignored".to_string());
        assert_eq!(list.state().editing, None);
    }

    #[test]
    fn test_save_edit_commits_title() {
        let (mut list, storage) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "A".to_string());
        list.set_edit_draft_title("B".to_string());
        list.save_edit(id);

        assert_eq!(titles(&list), vec!["B"]);
        assert_eq!(list.state().editing, None);
        assert_eq!(saved(&storage)[0].title, "B");
    }

    #[test]
    fn test_save_edit_allows_empty_title() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "A".to_string());
        list.set_edit_draft_title(String::new());
        list.save_edit(id);

        assert_eq!(titles(&list), vec![""]);
    }

    #[test]
    fn test_save_edit_with_other_id_is_noop() {
        let (mut list, _) = setup_list();
        let a = add(&mut list, "A");
        let b = add(&mut list, "B");

        list.start_edit(a, "A".to_string());
        list.set_edit_draft_title("changed".to_string());
        list.save_edit(b);

        assert_eq!(titles(&list), vec!["A", "B"]);
        assert!(list.state().is_editing(a));
    }

    #[test]
    fn test_cancel_edit_keeps_title() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "A".to_string());
        list.set_edit_draft_title("B".to_string());
        list.cancel_edit();

        assert_eq!(titles(&list), vec!["A"]);
        assert_eq!(list.state().editing, None);
    }

    #[test]
    fn test_save_then_cancel_leaves_no_edit() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "B".to_string());
        list.save_edit(id);
        list.cancel_edit();

        assert_eq!(list.state().editing, None);
        assert_eq!(titles(&list), vec!["B"]);
    }

    #[test]
    fn test_buy_milk_walk_dog_scenario() {
        let (mut list, _) = setup_list();
        let first = add(&mut list, "Buy milk");
        let second = add(&mut list, "Walk dog");
        list.toggle_completed(first);

        let items = &list.state().items;
        assert_ne!(first, second);
        assert_eq!(items.len(), 2);
        assert_eq!((items[0].title.as_str(), items[0].completed), ("Buy milk", true));
        assert_eq!((items[1].title.as_str(), items[1].completed), ("Walk dog", false));
    }

    #[test]
    fn test_cancel_clear_all_keeps_items() {
        let (mut list, _) = setup_list();
        add(&mut list, "A");
        add(&mut list, "B");

        list.request_clear_all();
        assert!(list.state().confirm_clear_visible);
        list.cancel_clear_all();

        assert!(!list.state().confirm_clear_visible);
        assert_eq!(titles(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_confirm_clear_all_empties_list() {
        let (mut list, storage) = setup_list();
        add(&mut list, "A");
        add(&mut list, "B");

        list.request_clear_all();
        list.confirm_clear_all();

        assert!(list.state().items.is_empty());
        assert!(!list.state().confirm_clear_visible);
        assert!(saved(&storage).is_empty());
    }

    #[test]
    fn test_confirm_clear_all_ends_edit() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "A".to_string());
        list.set_edit_draft_title("draft".to_string());
        list.request_clear_all();
        list.confirm_clear_all();

        assert!(list.state().items.is_empty());
        assert_eq!(list.state().editing, None);
    }

    #[test]
    fn test_request_clear_all_on_empty_list_is_noop() {
        let (mut list, _) = setup_list();
        list.request_clear_all();
        assert!(!list.state().confirm_clear_visible);
    }

    #[test]
    fn test_edit_and_clear_confirmation_may_overlap() {
        let (mut list, _) = setup_list();
        let id = add(&mut list, "A");

        list.start_edit(id, "A".to_string());
        list.request_clear_all();

        assert!(list.state().is_editing(id));
        assert!(list.state().confirm_clear_visible);
    }

    #[test]
    fn test_every_change_is_persisted() {
        let (mut list, storage) = setup_list();
        let id = add(&mut list, "A");
        assert_eq!(saved(&storage), list.state().items);

        list.toggle_completed(id);
        assert!(saved(&storage)[0].completed);

        list.remove_todo(id);
        assert!(saved(&storage).is_empty());
    }

    #[test]
    fn test_restart_round_trip() {
        let (mut list, storage) = setup_list();
        let a = add(&mut list, "A");
        add(&mut list, "B");
        add(&mut list, "C");
        list.toggle_completed(a);
        let before = list.state().items.clone();
        drop(list);

        let mut restored = TodoList::initialize(Some(Persistence::new(storage, KEY)), fixed_ids());
        assert_eq!(restored.state().items, before);

        // New ids must not reuse restored ones even when the clock lags behind
        let d = add(&mut restored, "D");
        assert!(before.iter().all(|item| item.id < d));
    }

    #[test]
    fn test_without_persistence() {
        let mut list = TodoList::initialize(None, fixed_ids());
        add(&mut list, "A");
        assert_eq!(titles(&list), vec!["A"]);
    }

    #[test]
    fn test_write_failure_keeps_state() {
        struct ReadOnly {
            writes: Rc<Cell<u32>>,
        }
        impl KeyValueStorage for ReadOnly {
            fn get(&self, _key: &str) -> StorageResult<Option<String>> {
                Ok(None)
            }
            fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
                self.writes.set(self.writes.get() + 1);
                Err(StorageError::Write("QuotaExceededError".into()))
            }
        }

        let writes = Rc::new(Cell::new(0));
        let storage = ReadOnly { writes: writes.clone() };
        let mut list = TodoList::initialize(Some(Persistence::new(storage, KEY)), fixed_ids());
        add(&mut list, "A");

        assert_eq!(titles(&list), vec!["A"]);
        assert_eq!(writes.get(), 2);
    }

    #[test]
    fn test_draft_and_modal_changes_do_not_write() {
        let (mut list, writes) = setup_counting(MemoryStorage::new());
        let id = add(&mut list, "A");
        assert_eq!(writes.get(), 2);

        list.set_draft_text("typing".to_string());
        list.start_edit(id, "A".to_string());
        list.cancel_edit();
        list.request_clear_all();
        list.cancel_clear_all();
        list.set_edit_draft_title("ignored".to_string());
        assert_eq!(writes.get(), 2);
    }

    #[test]
    fn test_enter_with_empty_draft_does_nothing() {
        let (mut list, writes) = setup_counting(MemoryStorage::new());
        add(&mut list, "A");
        let before = list.state().clone();
        let writes_before = writes.get();

        list.submit_on_enter_key(ENTER_KEY);

        assert_eq!(list.state(), &before);
        assert_eq!(writes.get(), writes_before);
    }

    #[test]
    fn test_add_after_max_id_is_refused() {
        let raw = r#"[{"id":18446744073709551615,"title":"A","completed":false}]"#;
        let (mut list, writes) = setup_counting(MemoryStorage::with_entry(KEY, raw));
        assert_eq!(list.state().items[0].id, TodoId::MAX);
        let writes_before = writes.get();

        list.set_draft_text("B".to_string());
        list.add_todo();

        assert_eq!(titles(&list), vec!["A"]);
        assert_eq!(list.state().draft_text, "B");
        assert_eq!(writes.get(), writes_before);
    }
}
