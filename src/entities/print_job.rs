//! Print job entity - 3D-print jobs with their cost breakdown.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Print job database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "print_jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: String,
    pub name: String,
    /// Filament used in grams
    pub filament_used: f64,
    pub filament_cost: f64,
    pub labor_hours: f64,
    pub hourly_rate: f64,
    pub electricity_cost: f64,
    /// Filament, labor and electricity combined
    pub total_cost: f64,
    pub date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
