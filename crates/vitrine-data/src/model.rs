#![forbid(unsafe_code)]

//! Recipe data model.
//!
//! [`Recipe`] and [`RecipeGroup`] share the same bindable header fields
//! (title, subtitle, image path, description); a view bound to any of them
//! re-renders that field when it changes and nothing else. Identity is the
//! immutable `unique_id`, assigned at construction.

use std::fmt;
use std::rc::Rc;

use vitrine_reactive::{ObservableList, Property, TopWindow};

/// A single recipe record with change-notifying fields.
///
/// Records are shared by reference (`Rc<Recipe>`) between the full item
/// collection and the windowed projection, so positional diffing compares
/// identities rather than field contents.
pub struct Recipe {
    unique_id: String,
    title: Property<String>,
    subtitle: Property<String>,
    image_path: Property<String>,
    description: Property<String>,
    content: Property<String>,
}

impl Recipe {
    pub fn new(
        unique_id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image_path: impl Into<String>,
        description: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: unique_id.into(),
            title: Property::new(title.into()),
            subtitle: Property::new(subtitle.into()),
            image_path: Property::new(image_path.into()),
            description: Property::new(description.into()),
            content: Property::new(content.into()),
        }
    }

    /// Immutable identity of this record.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    #[must_use]
    pub fn title(&self) -> &Property<String> {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &Property<String> {
        &self.subtitle
    }

    /// Path to the record's image asset. Carried as an opaque string;
    /// loading the image is the presentation layer's concern.
    #[must_use]
    pub fn image_path(&self) -> &Property<String> {
        &self.image_path
    }

    #[must_use]
    pub fn description(&self) -> &Property<String> {
        &self.description
    }

    #[must_use]
    pub fn content(&self) -> &Property<String> {
        &self.content
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title.with(|t| f.write_str(t))
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("unique_id", &self.unique_id)
            .field("title", &self.title.get())
            .finish_non_exhaustive()
    }
}

/// A named group of recipes with a bounded top-items projection.
///
/// `items` holds the full collection; `top_items` mirrors its first twelve
/// elements for the lifetime of the group, updated incrementally as items
/// are edited. A grid view binds to `top_items` and never has to virtualize
/// the full collection.
pub struct RecipeGroup {
    unique_id: String,
    title: Property<String>,
    subtitle: Property<String>,
    image_path: Property<String>,
    description: Property<String>,
    items: ObservableList<Rc<Recipe>>,
    top_items: TopWindow<Rc<Recipe>>,
}

impl RecipeGroup {
    pub fn new(
        unique_id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        image_path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let items = ObservableList::new();
        let top_items = TopWindow::attach(&items);
        Self {
            unique_id: unique_id.into(),
            title: Property::new(title.into()),
            subtitle: Property::new(subtitle.into()),
            image_path: Property::new(image_path.into()),
            description: Property::new(description.into()),
            items,
            top_items,
        }
    }

    /// Immutable identity of this group.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    #[must_use]
    pub fn title(&self) -> &Property<String> {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &Property<String> {
        &self.subtitle
    }

    #[must_use]
    pub fn image_path(&self) -> &Property<String> {
        &self.image_path
    }

    #[must_use]
    pub fn description(&self) -> &Property<String> {
        &self.description
    }

    /// The full item collection.
    #[must_use]
    pub fn items(&self) -> &ObservableList<Rc<Recipe>> {
        &self.items
    }

    /// The first twelve items, kept in sync with [`RecipeGroup::items`].
    #[must_use]
    pub fn top_items(&self) -> &TopWindow<Rc<Recipe>> {
        &self.top_items
    }
}

impl fmt::Display for RecipeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.title.with(|t| f.write_str(t))
    }
}

impl fmt::Debug for RecipeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecipeGroup")
            .field("unique_id", &self.unique_id)
            .field("title", &self.title.get())
            .field("item_count", &self.items.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
