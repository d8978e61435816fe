//! Record stores.
//!
//! One repository per entity kind, each scoped to a single account. The
//! [`RecordStore`] trait is what the rest of the crate talks to, so
//! [`crate::state::AppState`] can be driven by the sea-orm implementations in
//! production and by in-memory fakes in tests.

use crate::{
    errors::{Error, Result},
    models::{Identified, Validate},
};
use async_trait::async_trait;
use std::str::FromStr;

mod collection;
mod components;
mod employees;
mod loans;
mod print_jobs;
mod projects;
mod shareholders;
mod students;
mod transactions;

pub use collection::Collection;
pub use components::ComponentStore;
pub use employees::EmployeeStore;
pub use loans::LoanStore;
pub use print_jobs::PrintJobStore;
pub use projects::ProjectStore;
pub use shareholders::{InvestmentStore, ShareholderStore};
pub use students::StudentStore;
pub use transactions::TransactionStore;

/// List, create and delete for one entity kind.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Identified + Clone + Send + Sync;
    type Draft: Validate + Send + Sync;

    /// Singular name used in error messages, e.g. "transaction"
    const KIND: &'static str;
    /// Plural name used in error messages, e.g. "transactions"
    const PLURAL: &'static str;

    /// Every record of the account, in the kind's display order.
    async fn list(&self) -> Result<Vec<Self::Record>>;

    /// Inserts a record and returns it with its assigned id.
    async fn create(&self, draft: Self::Draft) -> Result<Self::Record>;

    /// Deletes a record. Deleting an id that does not exist is not an error.
    async fn delete(&self, id: i64) -> Result<()>;
}

/// Stores whose records can be partially updated.
#[async_trait]
pub trait PatchableStore: RecordStore {
    type Patch: Validate + Send + Sync;

    /// Applies only the fields present in `patch`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when no record of the account has `id`.
    async fn update(&self, id: i64, patch: Self::Patch) -> Result<Self::Record>;
}

/// Parses an enumerated text column, reporting a mismatch as a bad row.
pub(crate) fn parse_column<T>(table: &'static str, value: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    value.parse().map_err(|e: Error| Error::InvalidRecord {
        table,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_parse_column_reports_table() {
        let ok: Result<Category> = parse_column("transactions", "rent");
        assert!(matches!(ok, Ok(Category::Rent)));

        let err = parse_column::<Category>("transactions", "groceries");
        assert!(matches!(
            err,
            Err(Error::InvalidRecord { table: "transactions", .. })
        ));
    }
}
