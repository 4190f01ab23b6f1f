//! Newtype IDs for type-safe catalog references.
//!
//! Document database identifiers are opaque strings. The `define_id!` macro
//! wraps them so a store ID can never be passed where a menu item ID is
//! expected.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use sweet_creations_core::define_id;
/// define_id!(BranchId);
/// define_id!(CourierId);
///
/// let branch = BranchId::new("norte");
/// let courier = CourierId::new("norte");
///
/// assert_eq!(branch.as_str(), courier.as_str());
/// // These are different types, so this won't compile:
/// // let _: BranchId = courier;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(StoreId);
define_id!(MenuCategoryId);
define_id!(MenuItemId);
define_id!(CategoryId);

impl CategoryId {
    /// Raw identifier of the "all categories" pseudo-category.
    pub const ALL_ID: &'static str = "1";

    /// The "all categories" sentinel. Selecting it disables category filtering.
    #[must_use]
    pub fn all() -> Self {
        Self::new(Self::ALL_ID)
    }

    /// Whether this ID is the "all categories" sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.0 == Self::ALL_ID
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_transparently() {
        let id = StoreId::new("dulce-aroma");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dulce-aroma\"");

        let parsed: StoreId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_category_sentinel() {
        assert!(CategoryId::all().is_all());
        assert!(CategoryId::default().is_all());
        assert!(!CategoryId::new("2").is_all());
    }

    #[test]
    fn test_borrow_as_str_for_map_lookup() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(MenuItemId::new("croissant"), 2);
        assert_eq!(map.get("croissant"), Some(&2));
    }
}
