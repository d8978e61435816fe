//! Inventory valuation and export.
//!
//! Stock value and the low-stock flag are derived from components on the fly.
//! The CSV export is what the stock page downloads as `inventory.csv`.

use crate::{errors::Result, models::Component};
use serde::Serialize;
use std::io;

pub const CSV_HEADER: [&str; 7] = [
    "Name",
    "Category",
    "Quantity",
    "Unit Price",
    "Total Value",
    "Min Stock",
    "Status",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Low Stock")]
    LowStock,
}

impl StockStatus {
    /// `LowStock` when the quantity is strictly below the reorder threshold.
    #[must_use]
    pub const fn of(component: &Component) -> Self {
        if component.quantity < component.min_stock {
            Self::LowStock
        } else {
            Self::Ok
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::LowStock => "Low Stock",
        }
    }
}

#[must_use]
pub fn stock_value(components: &[Component]) -> f64 {
    components.iter().map(Component::stock_value).sum()
}

#[must_use]
pub fn low_stock_count(components: &[Component]) -> usize {
    components
        .iter()
        .filter(|c| StockStatus::of(c) == StockStatus::LowStock)
        .count()
}

/// Writes the inventory as CSV, one row per component in the given order.
///
/// Money columns carry exactly two decimals; counts are written as integers.
pub fn write_inventory_csv<W: io::Write>(components: &[Component], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for component in components {
        csv_writer.write_record([
            component.name.clone(),
            component.category.clone(),
            component.quantity.to_string(),
            format!("{:.2}", component.unit_price),
            format!("{:.2}", component.stock_value()),
            component.min_stock.to_string(),
            StockStatus::of(component).label().to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the inventory CSV into a string.
pub fn export_inventory_csv(components: &[Component]) -> Result<String> {
    let mut buffer = Vec::new();
    write_inventory_csv(components, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
