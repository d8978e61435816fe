//! Transaction entity - Every dated income or expense entry.
//!
//! `transaction_type` and `category` are stored as their lowercase tags and
//! parsed back into enums by the transaction store.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// `"income"` or `"expense"`
    pub transaction_type: String,
    /// Category tag, e.g. `"rent"` or `"3d-printing"`
    pub category: String,
    /// Transaction amount, always entered as a positive number
    pub amount: f64,
    /// Free-text description, may be empty
    pub description: String,
    /// Calendar date the transaction applies to
    pub date: Date,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
}

/// Transactions have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
