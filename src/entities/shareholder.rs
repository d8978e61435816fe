//! Shareholder entity - Owners of the business and what they have put in.
//!
//! `total_invested` is kept in step with the shareholder's investment rows by
//! [`crate::store::ShareholderStore::record_investment`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Shareholder database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shareholders")]
pub struct Model {
    /// Unique identifier for the shareholder
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning account
    pub account_id: String,
    pub name: String,
    /// Role in the company (e.g., "Founder & CEO")
    pub designation: String,
    /// Share of ownership in percent
    pub ownership_percentage: f64,
    /// Sum of all recorded investments
    pub total_invested: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

/// Defines relationships between Shareholder and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One shareholder has many investments
    #[sea_orm(has_many = "super::shareholder_investment::Entity")]
    Investments,
}

impl Related<super::shareholder_investment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Investments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
