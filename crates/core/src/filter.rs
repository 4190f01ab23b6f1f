//! Store catalog filtering.
//!
//! The filter is recomputed from the authoritative snapshot on every change
//! of category or query; nothing is maintained incrementally. Input order is
//! preserved.
//!
//! # Category matching
//!
//! A store matches when its lowercased kind equals the lowercased display
//! name, or that name with its final character replaced by `"ía"` (the chip
//! "Panadero" selects stores of kind `panadería`). This is a single
//! hardcoded rule, not general pluralization: "Panaderías" becomes
//! "panaderíía" and matches nothing.
//!
//! An unknown category ID matches every store.

use crate::types::{CategoryId, Store, StoreCategory};

/// Suffix substituted for the display name's final character.
const CATEGORY_SUFFIX: &str = "ía";

/// Selected category and search text, owned by the presentation layer.
///
/// Values are immutable; the `with_*` builders return a new state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub selected_category: CategoryId,
    pub query: String,
}

impl FilterState {
    #[must_use]
    pub fn new(selected_category: CategoryId, query: impl Into<String>) -> Self {
        Self {
            selected_category,
            query: query.into(),
        }
    }

    #[must_use]
    pub fn with_category(self, selected_category: CategoryId) -> Self {
        Self {
            selected_category,
            ..self
        }
    }

    #[must_use]
    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self
        }
    }

    /// The query with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_query(&self) -> &str {
        self.query.trim()
    }
}

/// Narrow `stores` to those matching the selected category and query.
///
/// Stable: the result is a sub-sequence of `stores` in the same order.
#[must_use]
pub fn filter_stores<'a>(
    stores: &'a [Store],
    categories: &[StoreCategory],
    state: &FilterState,
) -> Vec<&'a Store> {
    let category = CategoryMatcher::resolve(categories, &state.selected_category);
    let query = state.trimmed_query().to_lowercase();

    stores
        .iter()
        .filter(|store| category.matches(store))
        .filter(|store| query.is_empty() || matches_text(store, &query))
        .collect()
}

/// Category predicate resolved once per evaluation.
#[derive(Debug)]
enum CategoryMatcher {
    Any,
    Named { name: String, variant: String },
}

impl CategoryMatcher {
    fn resolve(categories: &[StoreCategory], selected: &CategoryId) -> Self {
        if selected.is_all() {
            return Self::Any;
        }

        // First entry wins when ids repeat.
        let Some(category) = categories.iter().find(|c| &c.id == selected) else {
            return Self::Any;
        };

        let name = category.name.to_lowercase();
        let mut variant = name.clone();
        variant.pop();
        variant.push_str(CATEGORY_SUFFIX);

        Self::Named { name, variant }
    }

    fn matches(&self, store: &Store) -> bool {
        match self {
            Self::Any => true,
            Self::Named { name, variant } => {
                let kind = store.category.as_str().to_lowercase();
                kind == *name || kind == *variant
            }
        }
    }
}

/// Whether `query` (already trimmed and lowercased) occurs in the store's
/// name, description or any single specialty.
fn matches_text(store: &Store, query: &str) -> bool {
    store.name.to_lowercase().contains(query)
        || store.description.to_lowercase().contains(query)
        || store
            .specialties
            .iter()
            .any(|specialty| specialty.to_lowercase().contains(query))
}
