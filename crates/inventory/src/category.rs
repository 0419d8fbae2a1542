use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, Entity};

/// A named grouping a product belongs to.
///
/// Categories are immutable once registered and never deleted. Lookup
/// identity is the name (case-insensitive); the id exists so products can
/// reference their category without shared ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
        }
    }

    /// Case-insensitive name match used by lookups.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn entity_id(&self) -> CategoryId {
        self.id
    }
}
