//! The listener registry — an insertion-ordered map from event name to
//! its listener records.
//!
//! `IndexMap` gives `names()` its registration order and, being a real
//! keyed map, cannot confuse an event called `"constructor"` or
//! `"__proto__"` with anything else. Entries use an explicit
//! scalar-or-sequence union so the overwhelmingly common one-listener
//! event never allocates a `Vec`.

use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use std::sync::Arc;

use crate::event::EventName;
use crate::listener::{Callback, ListenerRecord};

/// Dispatch snapshot: inline storage for the single-listener case.
pub(crate) type Snapshot<A> = SmallVec<[Callback<A>; 1]>;

/// Listener storage for one event name.
///
/// Invariant: `Many` always holds at least two records. Shrinking to
/// one collapses back to `Single`; shrinking to zero removes the entry.
pub(crate) enum Entry<A> {
    Single(ListenerRecord<A>),
    Many(Vec<ListenerRecord<A>>),
}

impl<A> Entry<A> {
    /// Append a record, promoting `Single` to `Many` when needed.
    fn push(&mut self, record: ListenerRecord<A>) {
        match self {
            Entry::Many(records) => records.push(record),
            Entry::Single(_) => {
                let Entry::Single(existing) = std::mem::replace(self, Entry::Many(Vec::new()))
                else {
                    unreachable!()
                };
                *self = Entry::Many(vec![existing, record]);
            }
        }
    }

    /// Clone out the callback handles present right now, in order.
    pub(crate) fn snapshot(&self) -> Snapshot<A> {
        match self {
            Entry::Single(record) => smallvec![Arc::clone(&record.callback)],
            Entry::Many(records) => records.iter().map(|r| Arc::clone(&r.callback)).collect(),
        }
    }

    /// Drop every one-shot record. Returns `true` when the entry is now
    /// empty and should be removed from the map.
    pub(crate) fn excise_once(&mut self) -> bool {
        let records = match self {
            Entry::Single(record) => return record.once,
            Entry::Many(records) => records,
        };
        records.retain(|r| !r.once);
        self.collapse()
    }

    /// Drop every record matching `callback` (and the `once_only`
    /// filter). Returns `true` when the entry is now empty.
    fn remove_matching(&mut self, callback: &Callback<A>, once_only: bool) -> bool {
        let records = match self {
            Entry::Single(record) => return record.matches(callback, once_only),
            Entry::Many(records) => records,
        };
        records.retain(|r| !r.matches(callback, once_only));
        self.collapse()
    }

    /// Restore the `Many`-holds-two-or-more invariant after a removal.
    /// Returns `true` when nothing is left.
    fn collapse(&mut self) -> bool {
        let records = match self {
            Entry::Single(_) => return false,
            Entry::Many(records) => records,
        };
        match records.len() {
            0 => true,
            1 => {
                if let Some(last) = records.pop() {
                    *self = Entry::Single(last);
                }
                false
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        match self {
            Entry::Single(_) => 1,
            Entry::Many(records) => records.len(),
        }
    }
}

/// The mapping from event name to listener records.
pub(crate) struct Registry<A> {
    events: IndexMap<EventName, Entry<A>>,
}

impl<A> Registry<A> {
    pub(crate) fn new() -> Self {
        Self {
            events: IndexMap::new(),
        }
    }

    /// Number of distinct event names holding at least one listener.
    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    /// Register a listener. Duplicate handles are kept as independent
    /// records, each invoked on emit.
    pub(crate) fn add(&mut self, name: EventName, callback: Callback<A>, once: bool) {
        let record = ListenerRecord::new(callback, once);
        match self.events.get_mut(&name) {
            Some(entry) => entry.push(record),
            None => {
                self.events.insert(name, Entry::Single(record));
            }
        }
    }

    pub(crate) fn get_mut(&mut self, name: &EventName) -> Option<&mut Entry<A>> {
        self.events.get_mut(name)
    }

    /// The callback handles for `name`, in registration order. Always a
    /// fresh copy — mutating the returned vector cannot touch the
    /// registry.
    pub(crate) fn callbacks_of(&self, name: &EventName) -> Vec<Callback<A>> {
        match self.events.get(name) {
            None => Vec::new(),
            Some(Entry::Single(record)) => vec![Arc::clone(&record.callback)],
            Some(Entry::Many(records)) => {
                records.iter().map(|r| Arc::clone(&r.callback)).collect()
            }
        }
    }

    /// O(1) existence check, no copying.
    pub(crate) fn has(&self, name: &EventName) -> bool {
        self.events.contains_key(name)
    }

    /// Remove every record for `name` matching `callback` and the
    /// `once_only` filter. Silently does nothing when `name` is absent
    /// or nothing matches.
    pub(crate) fn remove(&mut self, name: &EventName, callback: &Callback<A>, once_only: bool) {
        let emptied = match self.events.get_mut(name) {
            None => return,
            Some(entry) => entry.remove_matching(callback, once_only),
        };
        if emptied {
            self.clear_event(name);
        }
    }

    /// Drop the whole entry for `name`. Removing the last entry swaps
    /// in a fresh map so capacity from churn is released.
    pub(crate) fn clear_event(&mut self, name: &EventName) {
        if self.events.shift_remove(name).is_some() && self.events.is_empty() {
            self.events = IndexMap::new();
        }
    }

    /// Reset to pristine empty state in O(1).
    pub(crate) fn clear_all(&mut self) {
        self.events = IndexMap::new();
    }

    /// Every name holding at least one listener: string names first in
    /// registration order, then tokens in theirs.
    pub(crate) fn names(&self) -> Vec<EventName> {
        if self.events.is_empty() {
            return Vec::new();
        }
        let mut names: Vec<EventName> = self
            .events
            .keys()
            .filter(|name| !name.is_token())
            .cloned()
            .collect();
        names.extend(self.events.keys().filter(|name| name.is_token()).cloned());
        names
    }

    #[cfg(test)]
    fn listener_count(&self, name: &EventName) -> usize {
        self.events.get(name).map_or(0, Entry::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::callback;

    fn cb() -> Callback<()> {
        callback(|_| {})
    }

    #[test]
    fn first_listener_stays_scalar() {
        let mut reg: Registry<()> = Registry::new();
        reg.add("a".into(), cb(), false);
        assert!(matches!(reg.get_mut(&"a".into()), Some(Entry::Single(_))));
    }

    #[test]
    fn second_listener_promotes_to_sequence_preserving_order() {
        let mut reg: Registry<()> = Registry::new();
        let first = cb();
        let second = cb();
        reg.add("a".into(), first.clone(), false);
        reg.add("a".into(), second.clone(), false);

        let callbacks = reg.callbacks_of(&"a".into());
        assert_eq!(callbacks.len(), 2);
        assert!(Arc::ptr_eq(&callbacks[0], &first));
        assert!(Arc::ptr_eq(&callbacks[1], &second));
    }

    #[test]
    fn removal_collapses_sequence_back_to_scalar() {
        let mut reg: Registry<()> = Registry::new();
        let first = cb();
        let second = cb();
        reg.add("a".into(), first.clone(), false);
        reg.add("a".into(), second, false);

        // Down to one record: the entry must be Single again.
        reg.remove(&"a".into(), &first, false);
        assert_eq!(reg.listener_count(&"a".into()), 1);
        assert!(matches!(reg.get_mut(&"a".into()), Some(Entry::Single(_))));
    }

    #[test]
    fn removing_middle_record_keeps_relative_order() {
        let mut reg: Registry<()> = Registry::new();
        let (a, b, c) = (cb(), cb(), cb());
        reg.add("e".into(), a.clone(), false);
        reg.add("e".into(), b.clone(), false);
        reg.add("e".into(), c.clone(), false);

        reg.remove(&"e".into(), &b, false);

        let callbacks = reg.callbacks_of(&"e".into());
        assert_eq!(callbacks.len(), 2);
        assert!(Arc::ptr_eq(&callbacks[0], &a));
        assert!(Arc::ptr_eq(&callbacks[1], &c));
    }

    #[test]
    fn removing_last_listener_empties_the_registry() {
        let mut reg: Registry<()> = Registry::new();
        let only = cb();
        reg.add("a".into(), only.clone(), false);
        assert_eq!(reg.len(), 1);

        reg.remove(&"a".into(), &only, false);
        assert_eq!(reg.len(), 0);
        assert!(!reg.has(&"a".into()));
    }

    #[test]
    fn duplicate_handle_removed_everywhere_in_one_call() {
        let mut reg: Registry<()> = Registry::new();
        let dup = cb();
        let other = cb();
        reg.add("e".into(), dup.clone(), false);
        reg.add("e".into(), other.clone(), false);
        reg.add("e".into(), dup.clone(), false);

        reg.remove(&"e".into(), &dup, false);

        let callbacks = reg.callbacks_of(&"e".into());
        assert_eq!(callbacks.len(), 1);
        assert!(Arc::ptr_eq(&callbacks[0], &other));
    }

    #[test]
    fn excise_once_keeps_persistent_records() {
        let mut reg: Registry<()> = Registry::new();
        let keep = cb();
        reg.add("e".into(), cb(), true);
        reg.add("e".into(), keep.clone(), false);
        reg.add("e".into(), cb(), true);

        let entry = reg.get_mut(&"e".into()).expect("entry exists");
        assert!(!entry.excise_once());

        let callbacks = reg.callbacks_of(&"e".into());
        assert_eq!(callbacks.len(), 1);
        assert!(Arc::ptr_eq(&callbacks[0], &keep));
    }

    #[test]
    fn names_lists_strings_before_tokens() {
        use crate::event::Token;

        let mut reg: Registry<()> = Registry::new();
        let tok = Token::new();
        reg.add(tok.into(), cb(), false);
        reg.add("b".into(), cb(), false);
        reg.add("a".into(), cb(), false);

        let names = reg.names();
        assert_eq!(names[0], "b".into());
        assert_eq!(names[1], "a".into());
        assert_eq!(names[2], tok.into());
    }
}
