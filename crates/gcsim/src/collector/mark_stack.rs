//! Mark Stack - Work List for the Mark Phase
//!
//! Holds object ids still waiting to be visited. The mark phase pops an id,
//! marks it, and pushes its outgoing references, so traversal depth never
//! touches the host call stack. Already-marked ids are skipped by the caller;
//! the stack itself does no deduplication.

use crate::object::ObjectId;

/// MarkStack - LIFO work list of object ids
#[derive(Debug, Default)]
pub struct MarkStack {
    stack: Vec<ObjectId>,

    /// Counters for statistics
    pushed_count: usize,
    popped_count: usize,
}

impl MarkStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ObjectId) {
        self.stack.push(id);
        self.pushed_count += 1;
    }

    pub fn extend<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ObjectId>,
    {
        for id in ids {
            self.push(id);
        }
    }

    pub fn pop(&mut self) -> Option<ObjectId> {
        let id = self.stack.pop();
        if id.is_some() {
            self.popped_count += 1;
        }
        id
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Drop pending work and zero the counters, keeping the allocation
    pub fn reset(&mut self) {
        self.stack.clear();
        self.pushed_count = 0;
        self.popped_count = 0;
    }

    /// Ids pushed since the last reset
    pub fn pushed_count(&self) -> usize {
        self.pushed_count
    }

    /// Ids popped since the last reset
    pub fn popped_count(&self) -> usize {
        self.popped_count
    }
}
