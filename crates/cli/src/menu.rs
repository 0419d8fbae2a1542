//! Interactive menu loop: prompts, input parsing, report formatting.
//!
//! All parsing lives here; the service only ever sees typed values, and a
//! malformed entry aborts the current flow instead of the program.

use std::io::{BufRead, Write};

use stockroom_core::{Clock, DomainError};
use stockroom_inventory::{InventoryService, MovementKind, UnitPrice};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    RegisterProduct,
    QueryProduct,
    MoveStock,
    GenerateReport,
    Exit,
}

impl MenuOption {
    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::RegisterProduct),
            "2" => Some(Self::QueryProduct),
            "3" => Some(Self::MoveStock),
            "4" => Some(Self::GenerateReport),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportKind {
    Stock,
    Movements,
}

fn parse_report_kind(s: &str) -> Option<ReportKind> {
    match s.trim().to_lowercase().as_str() {
        "stock" => Some(ReportKind::Stock),
        "movements" => Some(ReportKind::Movements),
        _ => None,
    }
}

fn parse_direction(s: &str) -> Option<MovementKind> {
    match s.trim().to_lowercase().as_str() {
        "inbound" => Some(MovementKind::Inbound),
        "outbound" => Some(MovementKind::Outbound),
        _ => None,
    }
}

/// Run the menu loop until the user exits (or input reaches EOF).
pub fn run<C, R, W>(
    service: &mut InventoryService<C>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    loop {
        print_menu(output)?;
        let Some(choice) = read_line(input)? else {
            break;
        };
        match MenuOption::parse(&choice) {
            Some(MenuOption::RegisterProduct) => register_product(service, input, output)?,
            Some(MenuOption::QueryProduct) => query_product(service, input, output)?,
            Some(MenuOption::MoveStock) => move_stock(service, input, output)?,
            Some(MenuOption::GenerateReport) => generate_report(service, input, output)?,
            Some(MenuOption::Exit) => {
                writeln!(output, "Exiting.")?;
                break;
            }
            None => writeln!(output, "Invalid option. Try again.")?,
        }
    }
    Ok(())
}

fn print_menu<W: Write>(output: &mut W) -> anyhow::Result<()> {
    writeln!(output)?;
    writeln!(output, "Choose an option:")?;
    writeln!(output, "1 - Register product")?;
    writeln!(output, "2 - Query product")?;
    writeln!(output, "3 - Move stock")?;
    writeln!(output, "4 - Generate report")?;
    writeln!(output, "0 - Exit")?;
    write!(output, "Option: ")?;
    output.flush()?;
    Ok(())
}

/// Read one trimmed line; `None` means EOF.
fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> anyhow::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;
    read_line(input)
}

fn register_product<C: Clock, R: BufRead, W: Write>(
    service: &mut InventoryService<C>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let Some(name) = prompt(input, output, "Product name: ")? else {
        return Ok(());
    };
    let Some(category_name) = prompt(input, output, "Category name: ")? else {
        return Ok(());
    };
    let Some(price_raw) = prompt(input, output, "Unit price: ")? else {
        return Ok(());
    };
    let unit_price = match price_raw.parse::<UnitPrice>() {
        Ok(price) => price,
        Err(err) => {
            writeln!(output, "{err}")?;
            return Ok(());
        }
    };
    let Some(quantity_raw) = prompt(input, output, "Quantity: ")? else {
        return Ok(());
    };
    let Ok(quantity) = quantity_raw.parse::<u32>() else {
        writeln!(output, "Invalid quantity: {quantity_raw}")?;
        return Ok(());
    };
    let Some(location) = prompt(input, output, "Location: ")? else {
        return Ok(());
    };

    // Reuse an existing category when the name already exists (first match,
    // case-insensitive); register a new one otherwise.
    let category = match service.find_first_category_by_name(&category_name).cloned() {
        Some(existing) => existing,
        None => service.register_category(category_name),
    };
    let product = service.register_product(name, category.id, unit_price, quantity, location);
    tracing::info!(product = %product.name, category = %category.name, "product registered");
    writeln!(
        output,
        "Registered product: {} - Category: {}",
        product.name, category.name
    )?;
    Ok(())
}

fn query_product<C: Clock, R: BufRead, W: Write>(
    service: &InventoryService<C>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let Some(name) = prompt(input, output, "Product name: ")? else {
        return Ok(());
    };
    match service.find_first_product_by_name(&name) {
        Some(product) => writeln!(
            output,
            "Found: {} - Quantity: {}",
            product.name, product.quantity_on_hand
        )?,
        None => writeln!(output, "Product not found.")?,
    }
    Ok(())
}

fn move_stock<C: Clock, R: BufRead, W: Write>(
    service: &mut InventoryService<C>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let Some(name) = prompt(input, output, "Product name: ")? else {
        return Ok(());
    };
    let Some(direction_raw) = prompt(input, output, "Direction (inbound/outbound): ")? else {
        return Ok(());
    };
    let Some(kind) = parse_direction(&direction_raw) else {
        writeln!(output, "Invalid direction: {direction_raw}")?;
        return Ok(());
    };
    let Some(quantity_raw) = prompt(input, output, "Quantity: ")? else {
        return Ok(());
    };
    let Ok(quantity) = quantity_raw.parse::<u32>() else {
        writeln!(output, "Invalid quantity: {quantity_raw}")?;
        return Ok(());
    };

    let outcome = match kind {
        MovementKind::Inbound => service.record_inbound(&name, quantity),
        MovementKind::Outbound => service.record_outbound(&name, quantity),
    };
    match outcome {
        Ok(()) => {
            tracing::info!(product = %name, direction = %kind, quantity, "stock moved");
            writeln!(
                output,
                "Recorded {kind} movement of {quantity} units of {name}."
            )?;
        }
        Err(err) => report_domain_error(output, &err)?,
    }
    Ok(())
}

fn generate_report<C: Clock, R: BufRead, W: Write>(
    service: &InventoryService<C>,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()> {
    let Some(kind_raw) = prompt(input, output, "Report kind (stock/movements): ")? else {
        return Ok(());
    };
    match parse_report_kind(&kind_raw) {
        Some(ReportKind::Stock) => {
            writeln!(output, "Stock report:")?;
            for row in service.stock_report() {
                writeln!(
                    output,
                    "{} - Quantity on hand: {} - Location: {}",
                    row.name, row.quantity_on_hand, row.location
                )?;
            }
        }
        Some(ReportKind::Movements) => {
            writeln!(output, "Movement report:")?;
            for row in service.movement_report() {
                writeln!(
                    output,
                    "{} - {} units of {} - {}",
                    row.kind,
                    row.quantity,
                    row.product_name,
                    row.occurred_at.format(TIMESTAMP_FORMAT)
                )?;
            }
        }
        None => writeln!(output, "Invalid report kind: {kind_raw}")?,
    }
    Ok(())
}

fn report_domain_error<W: Write>(output: &mut W, err: &DomainError) -> anyhow::Result<()> {
    tracing::warn!(error = %err, "operation rejected");
    match err {
        DomainError::ProductNotFound(_) => writeln!(output, "Product not found.")?,
        DomainError::InsufficientStock { .. } => writeln!(output, "Insufficient stock.")?,
        other => writeln!(output, "{other}")?,
    }
    Ok(())
}
