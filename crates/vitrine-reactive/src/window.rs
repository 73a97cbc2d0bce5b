#![forbid(unsafe_code)]

//! Bounded top-window projection.
//!
//! [`TopWindow<T>`] mirrors the first K elements of an [`ObservableList`],
//! updated incrementally from the source's [`ListEvent`] stream. After every
//! applied event the window equals `source[0 .. min(K, source.len())]`,
//! element for element.
//!
//! The projection exists for view layers that redraw per windowed change:
//! rebuilding the window wholesale on every edit would cost O(K) regardless
//! of where the edit landed, and would collapse each source event into an
//! opaque full refresh on the consumer side. Instead, every source event maps
//! to at most two window mutations (O(1)-O(K), with only [`ListEvent::Reset`]
//! paying the full O(K) rebuild), and the window re-emits those mutations to
//! its own observers so a presentation layer can insert one visual row rather
//! than redraw all twelve.
//!
//! # Example
//!
//! ```
//! use vitrine_reactive::{ObservableList, TopWindow};
//!
//! let feed = ObservableList::from_vec(vec!["a", "b", "c", "d"]);
//! let top = TopWindow::attach_with_capacity(&feed, 3).unwrap();
//! assert_eq!(top.to_vec(), vec!["a", "b", "c"]);
//!
//! feed.remove(0);
//! assert_eq!(top.to_vec(), vec!["b", "c", "d"]); // tail refilled
//! ```

use thiserror::Error;
use tracing::trace;

use crate::list::{ListEvent, ObservableList};
use crate::property::Subscription;

/// Default window capacity.
///
/// Twelve fills a presentation grid evenly whether it is laid out as 1, 2,
/// 3, 4, or 6 rows.
pub const DEFAULT_CAPACITY: usize = 12;

/// Construction-time configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WindowError {
    /// A window must be able to hold at least one element.
    #[error("window capacity must be at least 1")]
    ZeroCapacity,
}

/// A capped projection of the first K elements of an [`ObservableList`].
///
/// The window is attached to exactly one source for its lifetime and is
/// mutated exclusively by the source's event stream; this type exposes reads
/// and [`TopWindow::subscribe`] only, never the mutating handle. Dropping
/// the window detaches it from the source.
///
/// # Invariants
///
/// 1. After every applied source event,
///    `window == source[0 .. min(capacity, source.len())]`.
/// 2. Window length never exceeds `capacity`.
/// 3. Each source event is applied exactly once, synchronously, in order.
pub struct TopWindow<T> {
    window: ObservableList<T>,
    capacity: usize,
    /// Keeps the sync callback registered on the source; dropped with self.
    _source_subscription: Subscription,
}

impl<T: std::fmt::Debug> std::fmt::Debug for TopWindow<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopWindow")
            .field("capacity", &self.capacity)
            .field("window", &self.window)
            .finish()
    }
}

impl<T: Clone + 'static> TopWindow<T> {
    /// Attach a window of [`DEFAULT_CAPACITY`] to `source`.
    ///
    /// The window fills from the source's current contents immediately;
    /// every later source mutation is applied incrementally.
    #[must_use]
    pub fn attach(source: &ObservableList<T>) -> Self {
        Self::build(source, DEFAULT_CAPACITY)
    }

    /// Attach a window of the given capacity to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::ZeroCapacity`] if `capacity` is 0.
    pub fn attach_with_capacity(
        source: &ObservableList<T>,
        capacity: usize,
    ) -> Result<Self, WindowError> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self::build(source, capacity))
    }

    fn build(source: &ObservableList<T>, capacity: usize) -> Self {
        let window = ObservableList::new();
        window.reset(source.with(|items| {
            items.iter().take(capacity).cloned().collect::<Vec<_>>()
        }));

        let handle = window.clone();
        let source_subscription = source.subscribe(move |items, event| {
            apply(&handle, capacity, items, event);
        });

        Self {
            window,
            capacity,
            _source_subscription: source_subscription,
        }
    }

    /// The fixed window capacity K.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current window length: `min(capacity, source.len())`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether the window is empty (the source is empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// A clone of the windowed element at `index`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.window.get(index)
    }

    /// A clone of the full window contents.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.window.to_vec()
    }

    /// Access the window contents as a borrowed slice without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        self.window.with(f)
    }

    /// Observe the window's own change stream.
    ///
    /// The window re-emits the same five event kinds as its source list, so
    /// a presentation layer can apply matching incremental updates (one
    /// inserted row, one removed row) instead of refreshing the whole
    /// window.
    pub fn subscribe(&self, callback: impl Fn(&[T], &ListEvent) + 'static) -> Subscription {
        self.window.subscribe(callback)
    }
}

/// Apply one source event to the window, touching only the affected range.
///
/// `source` is the source's post-mutation contents; indices in `event` are
/// assumed consistent with it (list mutators already enforce this).
fn apply<T: Clone + 'static>(
    window: &ObservableList<T>,
    capacity: usize,
    source: &[T],
    event: &ListEvent,
) {
    match *event {
        ListEvent::Inserted { index } => {
            if index < capacity {
                window.insert(index, source[index].clone());
                if window.len() > capacity {
                    // The old K-th element was pushed out the bottom.
                    window.remove(capacity);
                }
            }
        }
        ListEvent::Moved { from, to } => {
            if from < capacity && to < capacity {
                // Pure reorder within the window.
                window.move_item(from, to);
            } else if from < capacity {
                // Element left the window; the source's new K-th element
                // becomes visible, when there is one.
                window.remove(from);
                if source.len() >= capacity {
                    window.push(source[capacity - 1].clone());
                }
            } else if to < capacity {
                // Element entered the window; the old tail falls out.
                window.insert(to, source[to].clone());
                if window.len() > capacity {
                    window.remove(capacity);
                }
            }
        }
        ListEvent::Removed { index } => {
            if index < capacity {
                window.remove(index);
                if source.len() >= capacity {
                    window.push(source[capacity - 1].clone());
                }
            }
        }
        ListEvent::Replaced { index } => {
            if index < capacity {
                window.replace(index, source[index].clone());
            }
        }
        ListEvent::Reset => {
            window.reset(source.iter().take(capacity).cloned());
        }
    }
    trace!(?event, window_len = window.len(), "window synchronized");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
