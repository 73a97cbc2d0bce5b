#![forbid(unsafe_code)]

//! Explicit recipe data provider.
//!
//! [`RecipeStore`] is constructed by the caller and passed to whatever
//! consumes it; there is no process-wide singleton. [`RecipeStore::sample`]
//! fills the store with placeholder content so the layer works at design
//! time without live data.

use std::rc::Rc;

use tracing::debug;

use crate::model::{Recipe, RecipeGroup};
use vitrine_reactive::ObservableList;

/// Owns the group collection and answers identity lookups.
///
/// Lookups are simple linear scans: the data set is small, and an id that
/// matches zero records or more than one yields `None` rather than an
/// arbitrary pick.
pub struct RecipeStore {
    groups: ObservableList<Rc<RecipeGroup>>,
}

impl RecipeStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: ObservableList::new(),
        }
    }

    /// A store pre-filled with placeholder recipes.
    #[must_use]
    pub fn sample() -> Self {
        let store = Self::new();
        store.groups.push(Rc::new(sample_sushi_group()));
        debug!(
            groups = store.groups.len(),
            items = store.groups.with(|gs| gs.iter().map(|g| g.items().len()).sum::<usize>()),
            "sample store constructed"
        );
        store
    }

    /// The group collection.
    #[must_use]
    pub fn groups(&self) -> &ObservableList<Rc<RecipeGroup>> {
        &self.groups
    }

    /// The group whose `unique_id` matches exactly one record.
    #[must_use]
    pub fn group(&self, unique_id: &str) -> Option<Rc<RecipeGroup>> {
        self.groups.with(|groups| {
            unique_match(groups.iter().filter(|g| g.unique_id() == unique_id))
        })
    }

    /// The item whose `unique_id` matches exactly one record across all groups.
    #[must_use]
    pub fn item(&self, unique_id: &str) -> Option<Rc<Recipe>> {
        self.groups.with(|groups| {
            let mut found: Option<Rc<Recipe>> = None;
            for group in groups {
                let hit = group.items().with(|items| {
                    unique_match(items.iter().filter(|i| i.unique_id() == unique_id))
                });
                match (&found, hit) {
                    (Some(_), Some(_)) => return None, // Duplicated across groups.
                    (None, Some(item)) => found = Some(item),
                    _ => {}
                }
            }
            found
        })
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The single element of `iter`, or `None` when empty or ambiguous.
fn unique_match<'a, T>(mut iter: impl Iterator<Item = &'a Rc<T>>) -> Option<Rc<T>>
where
    T: 'a,
{
    let first = iter.next()?;
    if iter.next().is_some() {
        return None;
    }
    Some(Rc::clone(first))
}

fn sample_sushi_group() -> RecipeGroup {
    let group = RecipeGroup::new(
        "group-1",
        "Delicious Sushi",
        "Tasty sushi to make at home",
        "assets/0.jpg",
        "Sushi is known today as Japanese food, but old records trace its \
         roots back further. These are ten good-looking, approachable rolls \
         and nigiri, one short method each.",
    );

    let recipes: [(&str, &str, &str, &str, &str); 10] = [
        (
            "group-1-item-1",
            "Crab Roe Nigiri",
            "One",
            "Ingredients: sushi rice, nori, crab roe, wasabi.",
            "Shape the rice into equal balls and brush each with a little \
             wasabi. Wrap the sides with nori, leaving a third of the band \
             above the rice, then spoon the crab roe carefully into the cup.",
        ),
        (
            "group-1-item-2",
            "Kiwi Coconut Roll",
            "Two",
            "Ingredients: coconut milk, jasmine rice, vanilla bean, kiwi, \
             pineapple, sugar, water.",
            "Simmer the rice in coconut milk and water with sugar and the \
             split vanilla bean until soft, stirring often. Cool for two \
             hours, roll with peeled kiwi and pineapple on cling film, dust \
             with toasted coconut, and slice.",
        ),
        (
            "group-1-item-3",
            "Flying Fish Roe Rolls",
            "Three",
            "Ingredients: rice, flying fish roe, cucumber, wasabi, vinegar, \
             seafood soy sauce.",
            "Shave the cucumber lengthwise into wide ribbons, one per piece. \
             Press the rice into small flat rounds, wrap each in a cucumber \
             ribbon, dot with wasabi, and top with flying fish roe. Dip in \
             seafood soy sauce.",
        ),
        (
            "group-1-item-4",
            "Bibimbap Roll",
            "Four",
            "Ingredients: rice, laver, gochujang, almond butter, spinach, \
             sesame seeds, salt, sesame oil, shredded cabbage.",
            "Mix the rice with gochujang and almond butter. Blanch the \
             spinach and season it with sesame, salt, and sesame oil. Spread \
             rice over the laver, lay on cabbage and spinach, roll, and cut \
             with a wetted knife.",
        ),
        (
            "group-1-item-5",
            "Pink Radish Roll",
            "Five",
            "Ingredients: rice, laver, watermelon radish, sushi vinegar.",
            "Toss the shredded radish with sugar, white vinegar, lemon \
             juice, and a pinch of salt. After half an hour, fold the sweet \
             pickling liquid through the rice, roll, and slice. The radish \
             brings color and crunch along with the bite.",
        ),
        (
            "group-1-item-6",
            "Teddy Bear Sushi",
            "Six",
            "Ingredients: nori, rice, soy sauce, pork floss, ham.",
            "Season half the rice with sushi vinegar and the other half with \
             soy sauce and pork floss. Roll thin brown-rice rolls for the \
             ears and a ham-centered roll for the face, bundle them inside \
             the white rice, and cut nori scraps for eyes and nose.",
        ),
        (
            "group-1-item-7",
            "Peach Blossom Roll",
            "Seven",
            "Ingredients: rice, glutinous rice, amaranth, crab sticks, \
             cucumber, toasted nori, vinegar dressing.",
            "Wilt the amaranth with a little oil and salt, then fold the \
             rosy cooking juices through the white rice for a natural tint. \
             Spread both rices on the nori with crab stick and cucumber, \
             roll tightly, and slice with a wet blade.",
        ),
        (
            "group-1-item-8",
            "Pressed Crab Sushi",
            "Eight",
            "Ingredients: rice, toasted sesame, tinned crab meat, cucumber, \
             dried shiitake, laver, spring onion, sugar, soy sauce, sake.",
            "Pick over the crab and shred it. Soak the shiitake, chop, and \
             simmer with sugar, soy, and sake. Wet a pressing mold, layer \
             rice, laver, mushroom, and cucumber, more rice, then the crab \
             on top. Press firmly, unmold, cut, and scatter spring onion.",
        ),
        (
            "group-1-item-9",
            "Heart-Shaped Sushi",
            "Nine",
            "Ingredients: rice, laver, sushi vinegar, pickled cucumber, \
             omelet strips, carrot strips, a heart mold, crab roe, toasted \
             black sesame.",
            "Season the cooled rice with sweet vinegar. Oil the mold, press \
             in a layer of rice, add the fillings, cap with more rice, and \
             press well before unmolding. Band each heart with laver cut to \
             height, top with crab roe and sesame, and slice.",
        ),
        (
            "group-1-item-10",
            "Omelet Roll Sushi",
            "Ten",
            "Ingredients: sushi rice, laver, an even omelet sheet, corn, \
             diced sausage, diced carrot, dried tangerine peel.",
            "Fold the corn, sausage, carrot, and tangerine peel through the \
             rice. Lay cling film on the mat, then the omelet sheet, rice, \
             and filling. Roll gently so the egg does not tear, and slice.",
        ),
    ];

    for (id, title, subtitle, description, content) in recipes {
        group.items().push(Rc::new(Recipe::new(
            id,
            title,
            subtitle,
            format!("assets/{}.jpg", group.items().len() + 1),
            description,
            content,
        )));
    }

    group
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
