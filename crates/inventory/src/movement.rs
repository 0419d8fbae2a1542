use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, MovementId, ProductId};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Stock increase event.
    Inbound,
    /// Stock decrease event.
    Outbound,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementKind::Inbound => "inbound",
            MovementKind::Outbound => "outbound",
        };
        f.write_str(label)
    }
}

/// One entry of the append-only movement log.
///
/// Immutable once created; the log is never reordered or pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

impl Movement {
    pub fn new(
        product_id: ProductId,
        kind: MovementKind,
        quantity: u32,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MovementId::new(),
            product_id,
            kind,
            quantity,
            occurred_at,
        }
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn entity_id(&self) -> MovementId {
        self.id
    }
}
