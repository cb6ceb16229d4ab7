//! Item Id Source
//!
//! Ids come from a millisecond clock but never repeat or go backwards:
//! two items created in the same millisecond get consecutive ids.

use crate::models::{TodoId, TodoItem};

pub trait IdSource {
    /// `None` once the id space is exhausted
    fn next_id(&mut self) -> Option<TodoId>;
}

/// Clock-derived, strictly increasing ids
pub struct MonotonicIds {
    last: TodoId,
    clock: Box<dyn Fn() -> TodoId>,
}

impl MonotonicIds {
    pub fn new(clock: impl Fn() -> TodoId + 'static) -> Self {
        Self {
            last: 0,
            clock: Box::new(clock),
        }
    }

    /// Browser wall clock (`Date.now()`)
    pub fn browser_clock() -> Self {
        Self::new(|| js_sys::Date::now() as TodoId)
    }

    /// Make sure future ids exceed every id already in use
    pub fn seeded_from(mut self, items: &[TodoItem]) -> Self {
        if let Some(max) = items.iter().map(|item| item.id).max() {
            self.last = self.last.max(max);
        }
        self
    }
}

impl IdSource for MonotonicIds {
    fn next_id(&mut self) -> Option<TodoId> {
        let id = (self.clock)().max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }
}
