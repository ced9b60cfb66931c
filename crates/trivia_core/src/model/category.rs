//! Category domain model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store-assigned category identifier.
pub type CategoryId = i64;

/// Category id to label mapping, ordered by id.
///
/// Serializes as a JSON object keyed by the stringified id.
pub type CategoryMap = BTreeMap<CategoryId, String>;

/// Read-only question category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}

/// Builds the id -> label mapping from category records.
pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|category| (category.id, category.kind.clone()))
        .collect()
}

/// Quiz pool restriction derived from an optional category id.
///
/// Category id `0` is reserved and means "no restriction", the same as an
/// absent id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    All,
    Only(CategoryId),
}

impl CategoryScope {
    pub fn from_id(category_id: Option<CategoryId>) -> Self {
        match category_id {
            None | Some(0) => Self::All,
            Some(id) => Self::Only(id),
        }
    }

    /// Returns whether a question in `category` belongs to this scope.
    pub fn admits(self, category: CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(id) => id == category,
        }
    }
}
