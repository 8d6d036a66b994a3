//! Type-keyed scratch storage shared by sibling features.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Scratch storage shared by every feature returned from one dispatch call.
///
/// The engine creates a fresh bag before calling a dispatch function and
/// hands a clone to each returned feature's frame. Clones share the same
/// storage. Entries are keyed by type, so each grammar defines its own state
/// struct instead of agreeing on string keys.
///
/// # Example
///
/// ```rust
/// use weft_feature::Scratch;
///
/// #[derive(Default)]
/// struct Seen(u32);
///
/// let scratch = Scratch::new();
/// let shared = scratch.clone();
///
/// shared.with(|seen: &mut Seen| seen.0 += 1);
/// assert_eq!(scratch.with(|seen: &mut Seen| seen.0), 1);
/// ```
#[derive(Clone, Default)]
pub struct Scratch {
    entries: Rc<RefCell<HashMap<TypeId, Box<dyn Any>>>>,
}

impl Scratch {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with the entry of type `T`, inserting `T::default()` first if absent.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn with<T, R>(&self, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Default + 'static,
    {
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(T::default()));
        match entry.downcast_mut::<T>() {
            Some(value) => f(value),
            None => unreachable!("scratch entries are keyed by their own type"),
        }
    }

    /// Returns a copy of the entry of type `T`, if present.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.entries
            .borrow()
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }

    /// Stores `value`, returning the previous entry of the same type.
    pub fn insert<T: 'static>(&self, value: T) -> Option<T> {
        self.entries
            .borrow_mut()
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Returns true if an entry of type `T` is present.
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.borrow().contains_key(&TypeId::of::<T>())
    }

    /// Returns true if both handles point at the same storage.
    pub fn ptr_eq(&self, other: &Scratch) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scratch")
            .field("entries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter(u32);

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Label(String);

    #[test]
    fn test_with_inserts_default() {
        let scratch = Scratch::new();
        assert!(!scratch.contains::<Counter>());
        scratch.with(|c: &mut Counter| c.0 += 2);
        assert_eq!(scratch.get::<Counter>(), Some(Counter(2)));
    }

    #[test]
    fn test_clones_share_storage() {
        let scratch = Scratch::new();
        let other = scratch.clone();
        other.insert(Label("bracket".to_string()));

        assert!(scratch.ptr_eq(&other));
        assert_eq!(scratch.get::<Label>(), Some(Label("bracket".to_string())));
    }

    #[test]
    fn test_separate_bags_are_independent() {
        let a = Scratch::new();
        let b = Scratch::new();
        a.insert(Counter(1));

        assert!(!a.ptr_eq(&b));
        assert_eq!(b.get::<Counter>(), None);
    }

    #[test]
    fn test_insert_returns_previous() {
        let scratch = Scratch::new();
        assert_eq!(scratch.insert(Counter(1)), None);
        assert_eq!(scratch.insert(Counter(5)), Some(Counter(1)));
    }

    #[test]
    fn test_entries_keyed_by_type() {
        let scratch = Scratch::new();
        scratch.insert(Counter(3));
        scratch.insert(Label("x".to_string()));
        assert_eq!(scratch.get::<Counter>(), Some(Counter(3)));
        assert_eq!(format!("{:?}", scratch), "Scratch { entries: 2 }");
    }
}
