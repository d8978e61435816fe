//! Project entity - Client projects with their running cost and income.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    pub name: String,
    pub description: String,
    pub total_cost: f64,
    pub total_income: f64,
    pub hours_spent: f64,
    /// `"active"`, `"completed"` or `"paused"`
    pub status: String,
    pub start_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
