//! Component entity - Inventory items held in stock.
//!
//! Stock value and low-stock status are derived in [`crate::core::inventory`]
//! and never stored.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Component database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "components")]
pub struct Model {
    /// Unique identifier for the component
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// Item name (e.g., "Arduino Uno R3")
    pub name: String,
    /// Units on hand
    pub quantity: i32,
    /// Price per unit
    pub unit_price: f64,
    /// Reorder threshold; the item is low on stock below this quantity
    pub min_stock: i32,
    /// Free-text grouping (e.g., "Sensors")
    pub category: String,
}

/// Components have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
