//! The inventory service: owns all product, category, and movement state.

use chrono::{DateTime, Utc};

use stockroom_core::{CategoryId, Clock, DomainError, DomainResult, ProductId, SystemClock};

use crate::category::Category;
use crate::movement::{Movement, MovementKind};
use crate::product::{Product, UnitPrice};

/// One row of the stock report: current quantity and location per product,
/// in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockReportRow {
    pub name: String,
    pub quantity_on_hand: u32,
    pub location: String,
}

/// One row of the movement report, in movement creation order.
///
/// Carries the raw timestamp; the boundary decides how to format it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementReportRow {
    pub kind: MovementKind,
    pub quantity: u32,
    pub product_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// In-memory inventory tracker.
///
/// Owns the ordered product and category collections and the append-only
/// movement log. Lookups by name are case-insensitive and resolve to the
/// first stored match; duplicate names are allowed and never collapsed.
/// Failed operations mutate nothing and leave the service usable.
#[derive(Debug)]
pub struct InventoryService<C: Clock = SystemClock> {
    products: Vec<Product>,
    categories: Vec<Category>,
    movements: Vec<Movement>,
    clock: C,
}

impl InventoryService<SystemClock> {
    /// Service stamping movements with the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InventoryService<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InventoryService<C> {
    /// Service with an injected time source (fixed clocks in tests).
    pub fn with_clock(clock: C) -> Self {
        Self {
            products: Vec::new(),
            categories: Vec::new(),
            movements: Vec::new(),
            clock,
        }
    }

    /// Register a new category.
    ///
    /// Always succeeds; duplicate names produce distinct records with
    /// distinct ids.
    pub fn register_category(&mut self, name: impl Into<String>) -> Category {
        let category = Category::new(name);
        self.categories.push(category.clone());
        category
    }

    /// Register a new product.
    ///
    /// Always succeeds; name uniqueness is not enforced.
    pub fn register_product(
        &mut self,
        name: impl Into<String>,
        category_id: CategoryId,
        unit_price: UnitPrice,
        quantity_on_hand: u32,
        location: impl Into<String>,
    ) -> Product {
        let product = Product::new(name, category_id, unit_price, quantity_on_hand, location);
        self.products.push(product.clone());
        product
    }

    /// All products whose name matches case-insensitively, in storage order.
    pub fn find_products_by_name(&self, name: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.name_matches(name))
            .collect()
    }

    /// First stored product whose name matches case-insensitively.
    pub fn find_first_product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name_matches(name))
    }

    /// First stored category whose name matches case-insensitively.
    pub fn find_first_category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name_matches(name))
    }

    /// Record a stock increase for the first product matching `name`.
    pub fn record_inbound(&mut self, name: &str, quantity: u32) -> DomainResult<()> {
        let occurred_at = self.clock.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.name_matches(name))
            .ok_or_else(|| DomainError::product_not_found(name))?;
        product.quantity_on_hand += quantity;
        let product_id = product.id;
        self.movements.push(Movement::new(
            product_id,
            MovementKind::Inbound,
            quantity,
            occurred_at,
        ));
        Ok(())
    }

    /// Record a stock decrease for the first product matching `name`.
    ///
    /// Rejected without state change when the product is unknown or the
    /// requested quantity exceeds the quantity on hand.
    pub fn record_outbound(&mut self, name: &str, quantity: u32) -> DomainResult<()> {
        let occurred_at = self.clock.now();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.name_matches(name))
            .ok_or_else(|| DomainError::product_not_found(name))?;
        if product.quantity_on_hand < quantity {
            return Err(DomainError::insufficient_stock(
                product.name.clone(),
                quantity,
                product.quantity_on_hand,
            ));
        }
        product.quantity_on_hand -= quantity;
        let product_id = product.id;
        self.movements.push(Movement::new(
            product_id,
            MovementKind::Outbound,
            quantity,
            occurred_at,
        ));
        Ok(())
    }

    /// Current stock per product, in registration order.
    pub fn stock_report(&self) -> Vec<StockReportRow> {
        self.products
            .iter()
            .map(|p| StockReportRow {
                name: p.name.clone(),
                quantity_on_hand: p.quantity_on_hand,
                location: p.location.clone(),
            })
            .collect()
    }

    /// Every recorded movement, in creation order.
    ///
    /// Product names are resolved by id at generation time; products are
    /// never deleted, so every movement resolves.
    pub fn movement_report(&self) -> Vec<MovementReportRow> {
        self.movements
            .iter()
            .filter_map(|m| {
                self.product_name(m.product_id).map(|name| MovementReportRow {
                    kind: m.kind,
                    quantity: m.quantity,
                    product_name: name.to_string(),
                    occurred_at: m.occurred_at,
                })
            })
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    fn product_name(&self, id: ProductId) -> Option<&str> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockroom_core::FixedClock;

    fn test_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap()
    }

    fn test_service() -> InventoryService<FixedClock> {
        InventoryService::with_clock(FixedClock(test_instant()))
    }

    fn service_with_tv(quantity: u32) -> InventoryService<FixedClock> {
        let mut service = test_service();
        let electronics = service.register_category("Electronics");
        service.register_product(
            "TV LED",
            electronics.id,
            UnitPrice::from_cents(150_000),
            quantity,
            "A1",
        );
        service
    }

    #[test]
    fn register_category_stores_and_returns_the_record() {
        let mut service = test_service();
        let category = service.register_category("Electronics");
        assert_eq!(category.name, "Electronics");
        assert_eq!(service.categories(), &[category]);
    }

    #[test]
    fn duplicate_category_names_produce_distinct_records() {
        let mut service = test_service();
        let first = service.register_category("Electronics");
        let second = service.register_category("Electronics");
        assert_ne!(first.id, second.id);
        assert_eq!(service.categories().len(), 2);
    }

    #[test]
    fn register_product_stores_in_registration_order() {
        let mut service = test_service();
        let electronics = service.register_category("Electronics");
        service.register_product(
            "TV LED",
            electronics.id,
            UnitPrice::from_cents(150_000),
            10,
            "A1",
        );
        service.register_product(
            "Smartphone",
            electronics.id,
            UnitPrice::from_cents(200_000),
            15,
            "B3",
        );
        let names: Vec<_> = service.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["TV LED", "Smartphone"]);
    }

    #[test]
    fn find_first_product_by_name_is_case_insensitive() {
        let service = service_with_tv(10);
        let found = service.find_first_product_by_name("tv led").unwrap();
        assert_eq!(found.name, "TV LED");
        assert!(service.find_first_product_by_name("radio").is_none());
    }

    #[test]
    fn duplicate_product_names_resolve_to_first_registered() {
        let mut service = service_with_tv(10);
        let electronics = service.categories()[0].clone();
        service.register_product(
            "tv led",
            electronics.id,
            UnitPrice::from_cents(99_000),
            3,
            "Z9",
        );

        let matches = service.find_products_by_name("TV LED");
        assert_eq!(matches.len(), 2);

        let first = service.find_first_product_by_name("TV LED").unwrap();
        assert_eq!(first.location, "A1");

        // Movements against the shared name hit the first record only.
        service.record_inbound("TV LED", 1).unwrap();
        assert_eq!(service.products()[0].quantity_on_hand, 11);
        assert_eq!(service.products()[1].quantity_on_hand, 3);
    }

    #[test]
    fn find_first_category_by_name_is_case_insensitive() {
        let mut service = test_service();
        let electronics = service.register_category("Electronics");
        let found = service.find_first_category_by_name("ELECTRONICS").unwrap();
        assert_eq!(found.id, electronics.id);
        assert!(service.find_first_category_by_name("Furniture").is_none());
    }

    #[test]
    fn record_inbound_increments_stock_and_appends_movement() {
        let mut service = service_with_tv(10);
        service.record_inbound("TV LED", 5).unwrap();

        let product = service.find_first_product_by_name("TV LED").unwrap();
        assert_eq!(product.quantity_on_hand, 15);

        let movements = service.movements();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].kind, MovementKind::Inbound);
        assert_eq!(movements[0].quantity, 5);
        assert_eq!(movements[0].occurred_at, test_instant());
    }

    #[test]
    fn record_inbound_unknown_product_changes_nothing() {
        let mut service = service_with_tv(10);
        let err = service.record_inbound("Radio", 5).unwrap_err();
        assert_eq!(err, DomainError::ProductNotFound("Radio".to_string()));
        assert!(service.movements().is_empty());
        assert_eq!(service.products()[0].quantity_on_hand, 10);
    }

    #[test]
    fn record_outbound_decrements_stock_and_appends_movement() {
        let mut service = service_with_tv(10);
        service.record_outbound("TV LED", 4).unwrap();

        let product = service.find_first_product_by_name("TV LED").unwrap();
        assert_eq!(product.quantity_on_hand, 6);
        assert_eq!(service.movements()[0].kind, MovementKind::Outbound);
    }

    #[test]
    fn record_outbound_rejects_insufficient_stock() {
        let mut service = service_with_tv(5);
        let err = service.record_outbound("TV LED", 6).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                name: "TV LED".to_string(),
                requested: 6,
                available: 5,
            }
        );
        assert_eq!(service.products()[0].quantity_on_hand, 5);
        assert!(service.movements().is_empty());
    }

    #[test]
    fn record_outbound_unknown_product_changes_nothing() {
        let mut service = service_with_tv(10);
        assert!(service.record_outbound("Radio", 1).is_err());
        assert!(service.movements().is_empty());
        assert_eq!(service.products()[0].quantity_on_hand, 10);
    }

    #[test]
    fn inbound_then_outbound_restores_quantity_with_two_movements() {
        let mut service = service_with_tv(10);
        service.record_inbound("TV LED", 7).unwrap();
        service.record_outbound("TV LED", 7).unwrap();

        assert_eq!(service.products()[0].quantity_on_hand, 10);
        assert_eq!(service.movements().len(), 2);
    }

    #[test]
    fn outbound_of_entire_stock_reaches_zero() {
        let mut service = service_with_tv(5);
        service.record_outbound("TV LED", 5).unwrap();
        assert_eq!(service.products()[0].quantity_on_hand, 0);
    }

    #[test]
    fn stock_report_lists_products_in_registration_order() {
        let mut service = service_with_tv(10);
        let electronics = service.categories()[0].clone();
        service.register_product(
            "Smartphone",
            electronics.id,
            UnitPrice::from_cents(200_000),
            15,
            "B3",
        );

        let report = service.stock_report();
        assert_eq!(
            report,
            vec![
                StockReportRow {
                    name: "TV LED".to_string(),
                    quantity_on_hand: 10,
                    location: "A1".to_string(),
                },
                StockReportRow {
                    name: "Smartphone".to_string(),
                    quantity_on_hand: 15,
                    location: "B3".to_string(),
                },
            ]
        );
    }

    #[test]
    fn movement_report_preserves_call_order_and_resolves_names() {
        let mut service = service_with_tv(10);
        service.record_inbound("TV LED", 5).unwrap();
        service.record_outbound("tv led", 2).unwrap();

        let report = service.movement_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].kind, MovementKind::Inbound);
        assert_eq!(report[0].quantity, 5);
        assert_eq!(report[0].product_name, "TV LED");
        assert_eq!(report[1].kind, MovementKind::Outbound);
        assert_eq!(report[1].occurred_at, test_instant());
    }

    #[test]
    fn movement_report_counts_only_successful_calls() {
        let mut service = service_with_tv(10);
        service.record_inbound("TV LED", 5).unwrap();
        let _ = service.record_outbound("TV LED", 100);
        let _ = service.record_inbound("Radio", 1);
        service.record_outbound("TV LED", 1).unwrap();

        assert_eq!(service.movement_report().len(), 2);
    }

    #[test]
    fn oversized_outbound_after_inbound_is_rejected() {
        let mut service = service_with_tv(10);
        service.record_inbound("TV LED", 5).unwrap();
        assert_eq!(service.products()[0].quantity_on_hand, 15);
        assert_eq!(service.movements().len(), 1);

        assert!(service.record_outbound("TV LED", 20).is_err());
        assert_eq!(service.products()[0].quantity_on_hand, 15);
        assert_eq!(service.movements().len(), 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: the on-hand quantity always tracks the accepted
            /// movements exactly, and never goes negative.
            #[test]
            fn quantity_tracks_accepted_movements(
                initial in 0u32..1000,
                ops in proptest::collection::vec((any::<bool>(), 0u32..100), 0..64),
            ) {
                let mut service = service_with_tv(initial);

                let mut expected = initial;
                let mut accepted = 0usize;
                for (inbound, quantity) in ops {
                    let outcome = if inbound {
                        service.record_inbound("tv led", quantity)
                    } else {
                        service.record_outbound("tv led", quantity)
                    };
                    match outcome {
                        Ok(()) => {
                            expected = if inbound {
                                expected + quantity
                            } else {
                                expected - quantity
                            };
                            accepted += 1;
                        }
                        Err(DomainError::InsufficientStock { requested, available, .. }) => {
                            prop_assert!(!inbound);
                            prop_assert_eq!(available, expected);
                            prop_assert!(requested > available);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                    }

                    let current = service
                        .find_first_product_by_name("TV LED")
                        .expect("product stays registered")
                        .quantity_on_hand;
                    prop_assert_eq!(current, expected);
                }

                prop_assert_eq!(service.movements().len(), accepted);
                prop_assert_eq!(service.movement_report().len(), accepted);
            }

            /// Property: rejected operations never append to the log.
            #[test]
            fn unknown_product_never_moves_stock(
                quantity in 0u32..1000,
                inbound in any::<bool>(),
            ) {
                let mut service = service_with_tv(10);
                let outcome = if inbound {
                    service.record_inbound("no such product", quantity)
                } else {
                    service.record_outbound("no such product", quantity)
                };
                prop_assert!(outcome.is_err());
                prop_assert!(service.movements().is_empty());
                prop_assert_eq!(service.products()[0].quantity_on_hand, 10);
            }
        }
    }
}
