//! Loan entity - Amortizing company loans repaid in equal monthly installments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Loan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "loans")]
pub struct Model {
    /// Unique identifier for the loan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    /// Human-readable name (e.g., "Equipment financing")
    pub name: String,
    /// Amount borrowed
    pub principal_amount: f64,
    /// Annual interest rate in percent
    pub interest_rate: f64,
    /// Number of monthly installments in the loan term
    pub total_emi_count: i32,
    /// Installments paid so far
    pub paid_emi_count: i32,
    /// Fixed monthly installment
    pub emi_amount: f64,
    pub start_date: Date,
    pub lender: Option<String>,
    pub notes: Option<String>,
    /// `"active"` or `"completed"`
    pub status: String,
    /// When the loan was recorded
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
