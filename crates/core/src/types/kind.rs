//! Store kind enum.

use serde::{Deserialize, Serialize};

/// The closed set of store categories a catalog record can carry.
///
/// Serialized with the lowercase Spanish names used by the document database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreKind {
    #[serde(rename = "panadería")]
    Panaderia,
    #[serde(rename = "repostería")]
    Reposteria,
    #[serde(rename = "pastelería")]
    Pasteleria,
    #[serde(rename = "cafetería")]
    Cafeteria,
}

impl StoreKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 4] = [
        Self::Panaderia,
        Self::Reposteria,
        Self::Pasteleria,
        Self::Cafeteria,
    ];

    /// The stored (lowercase) name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Panaderia => "panadería",
            Self::Reposteria => "repostería",
            Self::Pasteleria => "pastelería",
            Self::Cafeteria => "cafetería",
        }
    }
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| format!("invalid store kind: {s}"))
    }
}
