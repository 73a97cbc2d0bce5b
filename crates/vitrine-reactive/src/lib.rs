#![forbid(unsafe_code)]

//! Vitrine reactive primitives.
//!
//! This crate provides the three building blocks of the Vitrine data layer:
//!
//! - [`Property`] - a single value with old-vs-new change detection and
//!   observer notification
//! - [`ObservableList`] - an ordered sequence mutated through five primitive
//!   operations, each announced as a [`ListEvent`]
//! - [`TopWindow`] - a capped projection that incrementally mirrors the first
//!   K elements of an [`ObservableList`]
//!
//! # Role in Vitrine
//! Everything here is single-threaded and synchronous: mutations notify
//! observers before the mutating call returns, in causal order, with no
//! batching or coalescing. A presentation layer subscribes to a list or a
//! window and applies each event as one incremental UI update instead of
//! redrawing from scratch.

pub mod list;
pub mod property;
pub mod window;

pub use list::{ListEvent, ObservableList};
pub use property::{Property, Subscription};
pub use window::{DEFAULT_CAPACITY, TopWindow, WindowError};
