#![forbid(unsafe_code)]

//! Observable ordered sequence.
//!
//! [`ObservableList<T>`] is a `Vec`-backed sequence mutated only through five
//! primitive operations: insert, move, remove, replace, and reset. Each
//! mutation is announced to observers as a single [`ListEvent`] carrying the
//! operation kind and the affected indices. Observers receive the event
//! together with the post-mutation contents, so positional projections (see
//! [`crate::window::TopWindow`]) can read the values they need without the
//! event itself carrying element payloads.
//!
//! # Delivery contract
//!
//! Events are delivered synchronously on the mutating call, one at a time,
//! in the order mutations occur. There is no reordering, batching, or
//! coalescing: a projection that applies each event as it arrives stays in
//! exact positional correspondence with the list.
//!
//! # Failure Modes
//!
//! - **Out-of-bounds index**: Mutators panic, matching `Vec` semantics. An
//!   index inconsistent with the list's length is a caller bug, not a
//!   runtime condition to handle.
//! - **Re-entrant mutation**: Mutating the list from inside one of its own
//!   observer callbacks panics (RefCell borrow rules). Observers may read
//!   freely and may mutate *other* lists.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::property::Subscription;

/// A single collection mutation, tagged with the affected indices.
///
/// Indices refer to the list's state *after* the mutation was applied,
/// except `Moved::from` and `Removed::index`, which name the position the
/// element occupied before it was taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// An element was inserted at `index`; later elements shifted right.
    Inserted { index: usize },
    /// The element at `from` was removed and re-inserted at `to`.
    Moved { from: usize, to: usize },
    /// The element at `index` was removed; later elements shifted left.
    Removed { index: usize },
    /// The element at `index` was overwritten in place.
    Replaced { index: usize },
    /// The entire contents were replaced wholesale.
    Reset,
}

type ListCallback<T> = Rc<dyn Fn(&[T], &ListEvent)>;

struct ListObserver<T> {
    id: u64,
    callback: ListCallback<T>,
}

struct ListInner<T> {
    items: Vec<T>,
    observers: Vec<ListObserver<T>>,
    next_observer_id: u64,
}

/// An ordered, observable sequence of `T`.
///
/// Cloning the handle shares the same inner list and observers, in the
/// manner of [`crate::Property`].
pub struct ObservableList<T> {
    inner: Rc<RefCell<ListInner<T>>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableList")
            .field("items", &inner.items)
            .field("observer_count", &inner.observers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> ObservableList<T> {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list with the given initial contents.
    ///
    /// No event is emitted for the initial contents; observers only see
    /// mutations that happen after they subscribe.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListInner {
                items,
                observers: Vec::new(),
                next_observer_id: 0,
            })),
        }
    }

    /// Insert `value` at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&self, index: usize, value: T) {
        self.inner.borrow_mut().items.insert(index, value);
        self.emit(ListEvent::Inserted { index });
    }

    /// Append `value` at the end of the list.
    pub fn push(&self, value: T) {
        let index = {
            let mut inner = self.inner.borrow_mut();
            inner.items.push(value);
            inner.items.len() - 1
        };
        self.emit(ListEvent::Inserted { index });
    }

    /// Remove and return the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&self, index: usize) -> T {
        let removed = self.inner.borrow_mut().items.remove(index);
        self.emit(ListEvent::Removed { index });
        removed
    }

    /// Move the element at `from` so that it ends up at `to`.
    ///
    /// Semantics are remove-then-insert: the element is taken out at `from`
    /// and re-inserted at `to` in the shortened list. A move where
    /// `from == to` still notifies observers.
    ///
    /// # Panics
    ///
    /// Panics if `from >= len` or `to >= len`.
    pub fn move_item(&self, from: usize, to: usize) {
        {
            let mut inner = self.inner.borrow_mut();
            let value = inner.items.remove(from);
            inner.items.insert(to, value);
        }
        self.emit(ListEvent::Moved { from, to });
    }

    /// Overwrite the element at `index` in place, returning the old value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn replace(&self, index: usize, value: T) -> T {
        let old = std::mem::replace(&mut self.inner.borrow_mut().items[index], value);
        self.emit(ListEvent::Replaced { index });
        old
    }

    /// Replace the entire contents with `values`.
    pub fn reset(&self, values: impl IntoIterator<Item = T>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.items.clear();
            inner.items.extend(values);
        }
        self.emit(ListEvent::Reset);
    }

    /// Empty the list. Equivalent to a reset with no contents.
    pub fn clear(&self) {
        self.reset(std::iter::empty());
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Whether the list holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    /// A clone of the element at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.borrow().items.get(index).cloned()
    }

    /// A clone of the full contents.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    /// Access the contents as a borrowed slice without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.borrow().items)
    }

    /// Register an observer. On every mutation the callback receives the
    /// post-mutation contents and the event describing the change.
    ///
    /// Returns a [`Subscription`] guard; dropping it removes the observer.
    pub fn subscribe(&self, callback: impl Fn(&[T], &ListEvent) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer_id;
            inner.next_observer_id += 1;
            inner.observers.push(ListObserver {
                id,
                callback: Rc::new(callback),
            });
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || detach(&weak, id))
    }

    /// Number of currently registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Deliver `event` to every observer, in registration order.
    ///
    /// Callbacks are collected under a short borrow first; during delivery
    /// only a shared borrow of the items is held, so observers may read the
    /// list but not mutate it.
    fn emit(&self, event: ListEvent) {
        let callbacks: Vec<ListCallback<T>> = {
            let inner = self.inner.borrow();
            inner
                .observers
                .iter()
                .map(|o| Rc::clone(&o.callback))
                .collect()
        };
        if callbacks.is_empty() {
            return;
        }
        let inner = self.inner.borrow();
        for cb in &callbacks {
            cb(&inner.items, &event);
        }
    }
}

/// Remove the observer with the given id, if the list is still alive.
fn detach<T>(inner: &Weak<RefCell<ListInner<T>>>, id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner.borrow_mut().observers.retain(|o| o.id != id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Record every (contents, event) pair an observer sees.
    fn recorded(
        list: &ObservableList<i32>,
    ) -> (Rc<RefCell<Vec<(Vec<i32>, ListEvent)>>>, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let sub = list.subscribe(move |items, event| {
            log_clone.borrow_mut().push((items.to_vec(), *event));
        });
        (log, sub)
    }

    #[test]
    fn new_list_is_empty() {
        let list: ObservableList<i32> = ObservableList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.get(0), None);
    }

    #[test]
    fn from_vec_emits_nothing() {
        let list = ObservableList::from_vec(vec![1, 2, 3]);
        let (log, _sub) = recorded(&list);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn insert_emits_inserted_with_post_mutation_contents() {
        let list = ObservableList::from_vec(vec![1, 3]);
        let (log, _sub) = recorded(&list);

        list.insert(1, 2);

        assert_eq!(
            *log.borrow(),
            vec![(vec![1, 2, 3], ListEvent::Inserted { index: 1 })]
        );
    }

    #[test]
    fn push_emits_inserted_at_tail() {
        let list = ObservableList::from_vec(vec![1, 2]);
        let (log, _sub) = recorded(&list);

        list.push(3);

        assert_eq!(
            *log.borrow(),
            vec![(vec![1, 2, 3], ListEvent::Inserted { index: 2 })]
        );
    }

    #[test]
    fn remove_returns_value_and_emits_removed() {
        let list = ObservableList::from_vec(vec![1, 2, 3]);
        let (log, _sub) = recorded(&list);

        let removed = list.remove(1);

        assert_eq!(removed, 2);
        assert_eq!(
            *log.borrow(),
            vec![(vec![1, 3], ListEvent::Removed { index: 1 })]
        );
    }

    #[test]
    fn move_item_is_remove_then_insert() {
        let list = ObservableList::from_vec(vec![1, 2, 3, 4]);
        let (log, _sub) = recorded(&list);

        list.move_item(3, 0);

        assert_eq!(
            *log.borrow(),
            vec![(vec![4, 1, 2, 3], ListEvent::Moved { from: 3, to: 0 })]
        );
    }

    #[test]
    fn move_item_toward_tail() {
        let list = ObservableList::from_vec(vec![1, 2, 3, 4]);
        list.move_item(0, 2);
        assert_eq!(list.to_vec(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn move_to_same_index_still_notifies() {
        let list = ObservableList::from_vec(vec![1, 2]);
        let (log, _sub) = recorded(&list);
        list.move_item(1, 1);
        assert_eq!(
            *log.borrow(),
            vec![(vec![1, 2], ListEvent::Moved { from: 1, to: 1 })]
        );
    }

    #[test]
    fn replace_returns_old_value() {
        let list = ObservableList::from_vec(vec![1, 2, 3]);
        let (log, _sub) = recorded(&list);

        let old = list.replace(2, 9);

        assert_eq!(old, 3);
        assert_eq!(
            *log.borrow(),
            vec![(vec![1, 2, 9], ListEvent::Replaced { index: 2 })]
        );
    }

    #[test]
    fn reset_replaces_contents_wholesale() {
        let list = ObservableList::from_vec(vec![1, 2, 3]);
        let (log, _sub) = recorded(&list);

        list.reset(vec![7, 8]);

        assert_eq!(*log.borrow(), vec![(vec![7, 8], ListEvent::Reset)]);
    }

    #[test]
    fn clear_is_reset_to_empty() {
        let list = ObservableList::from_vec(vec![1, 2, 3]);
        let (log, _sub) = recorded(&list);

        list.clear();

        assert!(list.is_empty());
        assert_eq!(*log.borrow(), vec![(vec![], ListEvent::Reset)]);
    }

    #[test]
    fn events_arrive_in_causal_order() {
        let list = ObservableList::new();
        let (log, _sub) = recorded(&list);

        list.push(1);
        list.insert(0, 0);
        list.remove(1);
        list.replace(0, 5);

        let events: Vec<ListEvent> = log.borrow().iter().map(|(_, e)| *e).collect();
        assert_eq!(
            events,
            vec![
                ListEvent::Inserted { index: 0 },
                ListEvent::Inserted { index: 0 },
                ListEvent::Removed { index: 1 },
                ListEvent::Replaced { index: 0 },
            ]
        );
    }

    #[test]
    fn subscription_drop_stops_delivery() {
        let list = ObservableList::new();
        let (log, sub) = recorded(&list);

        list.push(1);
        drop(sub);
        list.push(2);

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(list.observer_count(), 0);
    }

    #[test]
    fn multiple_observers_all_notified() {
        let list = ObservableList::new();
        let (log_a, _sub_a) = recorded(&list);
        let (log_b, _sub_b) = recorded(&list);

        list.push(1);

        assert_eq!(log_a.borrow().len(), 1);
        assert_eq!(log_b.borrow().len(), 1);
    }

    #[test]
    fn clone_shares_contents_and_observers() {
        let list = ObservableList::new();
        let handle = list.clone();
        let (log, _sub) = recorded(&list);

        handle.push(1);

        assert_eq!(list.to_vec(), vec![1]);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn observer_may_read_the_list() {
        let list = ObservableList::from_vec(vec![1]);
        let seen_len = Rc::new(std::cell::Cell::new(0usize));
        let seen_clone = Rc::clone(&seen_len);
        let handle = list.clone();
        let _sub = list.subscribe(move |_, _| seen_clone.set(handle.len()));

        list.push(2);
        assert_eq!(seen_len.get(), 2);
    }

    #[test]
    #[should_panic(expected = "insertion index")]
    fn insert_out_of_bounds_panics() {
        let list: ObservableList<i32> = ObservableList::new();
        list.insert(1, 0);
    }

    #[test]
    #[should_panic(expected = "removal index")]
    fn remove_out_of_bounds_panics() {
        let list: ObservableList<i32> = ObservableList::new();
        list.remove(0);
    }
}
