//! Shareholder investment entity - Individual capital contributions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shareholder investment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shareholder_investments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: String,
    /// ID of the shareholder who made the investment
    pub shareholder_id: i64,
    pub amount: f64,
    pub investment_date: Date,
    pub description: Option<String>,
}

/// Defines relationships between `ShareholderInvestment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each investment belongs to one shareholder
    #[sea_orm(
        belongs_to = "super::shareholder::Entity",
        from = "Column::ShareholderId",
        to = "super::shareholder::Column::Id"
    )]
    Shareholder,
}

impl Related<super::shareholder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shareholder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
