//! Interactive inventory menu entry point.

mod menu;

use stockroom_inventory::{InventoryService, UnitPrice};

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let mut service = InventoryService::new();
    seed(&mut service);
    tracing::info!(
        products = service.products().len(),
        categories = service.categories().len(),
        "inventory service ready"
    );

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    menu::run(&mut service, &mut input, &mut output)
}

/// Starting catalog so the menu has something to query and move.
fn seed(service: &mut InventoryService) {
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
}
