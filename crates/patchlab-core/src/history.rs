use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::patch::OperationRecord;

/// Default capacity of each history stack.
pub const DEFAULT_CAPACITY: usize = 10;

/// What happens to the redo stack when a new operation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedoPolicy {
    /// Leave redoable operations in place. Redo then re-applies them on top
    /// of whatever the newer operations produced.
    #[default]
    Preserve,
    /// Discard redoable operations, the convention most editors follow.
    ClearOnApply,
}

/// A LIFO stack holding at most `capacity` records.
///
/// Pushing onto a full stack evicts the oldest (bottom) record and hands it
/// back to the caller, so a discard is never silent.
#[derive(Debug, Clone)]
pub struct BoundedStack {
    entries: VecDeque<OperationRecord>,
    capacity: usize,
}

impl BoundedStack {
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be at least 1");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a record on top. Returns the evicted oldest record if the stack
    /// was full.
    pub fn push(&mut self, record: OperationRecord) -> Option<OperationRecord> {
        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(record);
        evicted
    }

    /// Remove and return the top record, if any.
    pub fn pop(&mut self) -> Option<OperationRecord> {
        self.entries.pop_back()
    }

    /// The top record without removing it.
    pub fn peek(&self) -> Option<&OperationRecord> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &OperationRecord> {
        self.entries.iter()
    }
}

impl Default for BoundedStack {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

/// Undo/redo history: two bounded stacks of applied operations.
#[derive(Debug, Clone)]
pub struct OperationHistory {
    undo: BoundedStack,
    redo: BoundedStack,
    redo_policy: RedoPolicy,
}

impl OperationHistory {
    pub fn new(capacity: usize, redo_policy: RedoPolicy) -> Self {
        Self {
            undo: BoundedStack::with_capacity(capacity),
            redo: BoundedStack::with_capacity(capacity),
            redo_policy,
        }
    }

    /// Record a freshly applied operation. Applies the redo policy, then
    /// pushes onto the undo stack; returns the evicted record if the push
    /// overflowed.
    pub fn record_apply(&mut self, record: OperationRecord) -> Option<OperationRecord> {
        if self.redo_policy == RedoPolicy::ClearOnApply {
            self.redo.clear();
        }
        self.undo.push(record)
    }

    pub fn pop_undo(&mut self) -> Option<OperationRecord> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<OperationRecord> {
        self.redo.pop()
    }

    /// Move an undone record onto the redo stack.
    pub fn push_redo(&mut self, record: OperationRecord) -> Option<OperationRecord> {
        self.redo.push(record)
    }

    /// Move a redone record back onto the undo stack.
    pub fn push_undo(&mut self, record: OperationRecord) -> Option<OperationRecord> {
        self.undo.push(record)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// (undo count, redo count).
    pub fn depth(&self) -> (usize, usize) {
        (self.undo.len(), self.redo.len())
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo.peek().map(|r| r.description())
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo.peek().map(|r| r.description())
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn undo_stack(&self) -> &BoundedStack {
        &self.undo
    }

    pub fn redo_stack(&self) -> &BoundedStack {
        &self.redo
    }
}

impl Default for OperationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, RedoPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::filters::FilterKind;
    use crate::patch::{Patch, Region};

    fn record() -> OperationRecord {
        let image = PixelBuffer::new(4, 4);
        let patch =
            Patch::from_image(&image, FilterKind::Negate, Region::new(0, 0, 2, 2)).unwrap();
        OperationRecord::new(patch)
    }

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = BoundedStack::with_capacity(3);
        let (a, b) = (record(), record());
        let (a_id, b_id) = (a.id(), b.id());
        assert!(stack.push(a).is_none());
        assert!(stack.push(b).is_none());
        assert_eq!(stack.pop().unwrap().id(), b_id);
        assert_eq!(stack.pop().unwrap().id(), a_id);
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut stack = BoundedStack::with_capacity(2);
        let (a, b, c) = (record(), record(), record());
        let a_id = a.id();
        assert!(stack.push(a).is_none());
        assert!(stack.push(b).is_none());
        let evicted = stack.push(c).expect("push at capacity must evict");
        assert_eq!(evicted.id(), a_id);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_rejected() {
        BoundedStack::with_capacity(0);
    }

    #[test]
    fn test_clear_on_apply_policy() {
        let mut history = OperationHistory::new(4, RedoPolicy::ClearOnApply);
        assert!(history.record_apply(record()).is_none());
        let undone = history.pop_undo().unwrap();
        assert!(history.push_redo(undone).is_none());
        assert!(history.can_redo());

        assert!(history.record_apply(record()).is_none());
        assert!(!history.can_redo());
        assert_eq!(history.depth(), (1, 0));
    }

    #[test]
    fn test_preserve_policy_keeps_redo() {
        let mut history = OperationHistory::default();
        assert!(history.record_apply(record()).is_none());
        let undone = history.pop_undo().unwrap();
        assert!(history.push_redo(undone).is_none());

        assert!(history.record_apply(record()).is_none());
        assert!(history.can_redo());
        assert_eq!(history.depth(), (1, 1));
    }
}
