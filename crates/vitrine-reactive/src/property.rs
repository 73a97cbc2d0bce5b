#![forbid(unsafe_code)]

//! Change-notifying value wrapper.
//!
//! # Design
//!
//! [`Property<T>`] wraps a value in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Every write compares the old and new values with
//! `PartialEq`; on change, a monotonic version counter is bumped and all
//! registered observers are called in registration order. Writing an equal
//! value is a no-op.
//!
//! Observers are registered explicitly through [`Property::subscribe`] and
//! removed by dropping the returned [`Subscription`] guard. There is no
//! reliance on member-access hooks: the observer list and the emit step are
//! plain data and a plain loop.
//!
//! # Failure Modes
//!
//! - **Re-entrant write**: Calling `set()` or `update()` from inside an
//!   observer callback panics (RefCell borrow rules). Re-entrant mutation
//!   indicates a cycle in the observer graph and is a caller bug.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Observer<T> {
    id: u64,
    callback: Callback<T>,
}

struct PropertyInner<T> {
    value: T,
    version: u64,
    observers: Vec<Observer<T>>,
    next_observer_id: u64,
}

/// A shared, version-tracked value with change notification.
///
/// Cloning a `Property` creates a second handle to the **same** inner state;
/// both handles see the same value and share observers.
///
/// # Invariants
///
/// 1. `version` increments by exactly 1 on each value-changing write.
/// 2. `set(v)` where `v == current` notifies nobody and bumps nothing.
/// 3. Observers are called in registration order.
pub struct Property<T> {
    inner: Rc<RefCell<PropertyInner<T>>>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Property")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("observer_count", &inner.observers.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> {
    /// Create a new property with the given initial value.
    ///
    /// The initial version is 0 and no observers are registered.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(PropertyInner {
                value,
                version: 0,
                observers: Vec::new(),
                next_observer_id: 0,
            })),
        }
    }

    /// Get a clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Write a new value. If it differs from the current value the version
    /// is bumped and observers are notified; otherwise nothing happens.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.version += 1;
        }
        self.emit();
    }

    /// Modify the value in place. The closure's result is compared against a
    /// snapshot of the old value; observers are notified only on change.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let old = inner.value.clone();
            f(&mut inner.value);
            if inner.value != old {
                inner.version += 1;
                true
            } else {
                false
            }
        };
        if changed {
            self.emit();
        }
    }

    /// Register an observer. The callback receives a reference to the new
    /// value on every change.
    ///
    /// Returns a [`Subscription`] guard; dropping it removes the observer.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_observer_id;
            inner.next_observer_id += 1;
            inner.observers.push(Observer {
                id,
                callback: Rc::new(callback),
            });
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || detach(&weak, id))
    }

    /// Current version number. Increments by 1 on each value-changing write.
    /// Useful for dirty-checking in render loops.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of currently registered observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Call every observer with the current value.
    ///
    /// Callbacks are collected first so the borrow is released before any
    /// observer code runs; observers may read the property freely.
    fn emit(&self) {
        let callbacks: Vec<Callback<T>> = {
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
        let value = self.inner.borrow().value.clone();
        for cb in &callbacks {
            cb(&value);
        }
    }
}

/// Remove the observer with the given id, if the property is still alive.
fn detach<T>(inner: &Weak<RefCell<PropertyInner<T>>>, id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner.borrow_mut().observers.retain(|o| o.id != id);
    }
}

/// RAII guard for a registered observer.
///
/// Dropping the guard removes the observer from whatever it was watching;
/// the callback will not run again after the drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Detach without waiting for scope exit.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_set_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
        assert_eq!(prop.version(), 0);

        prop.set(99);
        assert_eq!(prop.get(), 99);
        assert_eq!(prop.version(), 1);
    }

    #[test]
    fn equal_write_is_a_no_op() {
        let prop = Property::new(42);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let _sub = prop.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        prop.set(42);
        assert_eq!(prop.version(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn with_borrows_without_cloning() {
        let prop = Property::new(vec![1, 2, 3]);
        let sum = prop.with(|v| v.iter().sum::<i32>());
        assert_eq!(sum, 6);
    }

    #[test]
    fn update_mutates_in_place() {
        let prop = Property::new(vec![1, 2, 3]);
        prop.update(|v| v.push(4));
        assert_eq!(prop.get(), vec![1, 2, 3, 4]);
        assert_eq!(prop.version(), 1);
    }

    #[test]
    fn update_without_change_does_not_bump() {
        let prop = Property::new(10);
        prop.update(|v| *v = 10);
        assert_eq!(prop.version(), 0);
    }

    #[test]
    fn observer_sees_new_value() {
        let prop = Property::new(0);
        let last = Rc::new(Cell::new(0));
        let last_clone = Rc::clone(&last);
        let _sub = prop.subscribe(move |v| last_clone.set(*v));

        prop.set(42);
        assert_eq!(last.get(), 42);
        prop.set(99);
        assert_eq!(last.get(), 99);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let prop = Property::new(0);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let sub = prop.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        prop.set(1);
        assert_eq!(hits.get(), 1);

        drop(sub);
        prop.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(prop.observer_count(), 0);
    }

    #[test]
    fn explicit_cancel_unsubscribes() {
        let prop = Property::new(0);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let sub = prop.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        sub.cancel();
        prop.set(1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn observers_called_in_registration_order() {
        let prop = Property::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log1 = Rc::clone(&log);
        let _s1 = prop.subscribe(move |_| log1.borrow_mut().push('A'));
        let log2 = Rc::clone(&log);
        let _s2 = prop.subscribe(move |_| log2.borrow_mut().push('B'));
        let log3 = Rc::clone(&log);
        let _s3 = prop.subscribe(move |_| log3.borrow_mut().push('C'));

        prop.set(1);
        assert_eq!(*log.borrow(), vec!['A', 'B', 'C']);
    }

    #[test]
    fn partial_observer_drop() {
        let prop = Property::new(0);
        let a = Rc::new(Cell::new(0u32));
        let b = Rc::new(Cell::new(0u32));
        let a_clone = Rc::clone(&a);
        let b_clone = Rc::clone(&b);

        let sub_a = prop.subscribe(move |_| a_clone.set(a_clone.get() + 1));
        let _sub_b = prop.subscribe(move |_| b_clone.set(b_clone.get() + 1));

        prop.set(1);
        drop(sub_a);
        prop.set(2);

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn clone_shares_state_and_observers() {
        let prop1 = Property::new(0);
        let prop2 = prop1.clone();
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let _sub = prop1.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        prop2.set(42);
        assert_eq!(prop1.get(), 42);
        assert_eq!(prop1.version(), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn version_is_monotonic_over_many_writes() {
        let prop = Property::new(0);
        for i in 1..=100 {
            prop.set(i);
        }
        assert_eq!(prop.version(), 100);
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn subscription_outliving_property_is_harmless() {
        let prop = Property::new(0);
        let sub = prop.subscribe(|_| {});
        drop(prop);
        drop(sub); // Must not panic on the dead weak reference.
    }

    #[test]
    fn debug_format() {
        let prop = Property::new(42);
        let dbg = format!("{prop:?}");
        assert!(dbg.contains("Property"));
        assert!(dbg.contains("42"));
        assert!(dbg.contains("version"));
    }
}
