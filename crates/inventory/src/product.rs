use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, Entity, ProductId, ValueObject};

/// Unit price in the smallest currency unit (e.g., cents).
///
/// Parses from decimal strings ("1500.00", "99", "7.5") and displays back
/// with two fraction digits. Negative amounts are unrepresentable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(u64);

impl UnitPrice {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl ValueObject for UnitPrice {}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for UnitPrice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(DomainError::validation("price cannot be empty"));
        }
        if frac.len() > 2 {
            return Err(DomainError::validation(format!(
                "price has more than two fraction digits: {trimmed}"
            )));
        }
        let whole_units: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| DomainError::validation(format!("invalid price: {trimmed}")))?
        };
        let frac_cents: u64 = if frac.is_empty() {
            0
        } else {
            let parsed: u64 = frac
                .parse()
                .map_err(|_| DomainError::validation(format!("invalid price: {trimmed}")))?;
            // One fraction digit means tenths ("7.5" -> 750 cents).
            if frac.len() == 1 { parsed * 10 } else { parsed }
        };
        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| DomainError::validation(format!("price out of range: {trimmed}")))?;
        Ok(Self(cents))
    }
}

/// A stocked product.
///
/// `quantity_on_hand` changes only through the service's movement operations.
/// The name is the lookup identity (case-insensitive); it is not required to
/// be unique, and lookups resolve duplicates to the first stored match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category_id: CategoryId,
    pub unit_price: UnitPrice,
    pub quantity_on_hand: u32,
    pub location: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        unit_price: UnitPrice,
        quantity_on_hand: u32,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            category_id,
            unit_price,
            quantity_on_hand,
            location: location.into(),
        }
    }

    /// Case-insensitive name match used by lookups.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn entity_id(&self) -> ProductId {
        self.id
    }
}
