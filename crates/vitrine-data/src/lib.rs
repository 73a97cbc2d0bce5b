#![forbid(unsafe_code)]

//! Vitrine sample data layer.
//!
//! Strongly-typed recipe records bound through the `vitrine-reactive`
//! primitives: every mutable field is a change-notifying [`Property`],
//! every collection is an [`ObservableList`], and each [`RecipeGroup`]
//! keeps a twelve-element [`TopWindow`] over its items so a grid view can
//! show a bounded subset without virtualizing the full collection.
//!
//! The [`RecipeStore`] ships hardcoded placeholder content so the data is
//! available at design time and runtime alike; swap it out for real data by
//! constructing a store from your own records.
//!
//! [`Property`]: vitrine_reactive::Property
//! [`ObservableList`]: vitrine_reactive::ObservableList
//! [`TopWindow`]: vitrine_reactive::TopWindow

pub mod model;
pub mod store;

pub use model::{Recipe, RecipeGroup};
pub use store::RecipeStore;
