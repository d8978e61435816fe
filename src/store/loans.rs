//! Loan store.
//!
//! The installment amount is fixed when the loan is created; see
//! [`crate::core::loan::installment_for`].

use super::{PatchableStore, RecordStore, parse_column};
use crate::{
    core::loan::installment_for,
    entities::{Loan as LoanEntity, LoanColumn, loan},
    errors::{Error, Result},
    models::{Loan, LoanPatch, LoanStatus, NewLoan},
};
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct LoanStore {
    db: DatabaseConnection,
    account_id: String,
}

impl LoanStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl TryFrom<loan::Model> for Loan {
    type Error = Error;

    fn try_from(row: loan::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            status: parse_column("loans", &row.status)?,
            name: row.name,
            principal_amount: row.principal_amount,
            interest_rate: row.interest_rate,
            total_emi_count: row.total_emi_count,
            paid_emi_count: row.paid_emi_count,
            emi_amount: row.emi_amount,
            start_date: row.start_date,
            lender: row.lender,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl RecordStore for LoanStore {
    type Record = Loan;
    type Draft = NewLoan;

    const KIND: &'static str = "loan";
    const PLURAL: &'static str = "loans";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Loan>> {
        LoanEntity::find()
            .filter(LoanColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(LoanColumn::CreatedAt)
            .order_by_desc(LoanColumn::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Loan::try_from)
            .collect()
    }

    /// New loans start active with nothing paid.
    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewLoan) -> Result<Loan> {
        let emi_amount = installment_for(&draft);
        let model = loan::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            principal_amount: Set(draft.principal_amount),
            interest_rate: Set(draft.interest_rate),
            total_emi_count: Set(draft.total_emi_count),
            paid_emi_count: Set(0),
            emi_amount: Set(emi_amount),
            start_date: Set(draft.start_date),
            lender: Set(draft.lender),
            notes: Set(draft.notes),
            status: Set(LoanStatus::Active.as_str().to_string()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created loan {} with EMI {}", row.id, row.emi_amount);
        row.try_into()
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        LoanEntity::delete_many()
            .filter(LoanColumn::Id.eq(id))
            .filter(LoanColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PatchableStore for LoanStore {
    type Patch = LoanPatch;

    #[instrument(skip(self, patch), fields(account = %self.account_id))]
    async fn update(&self, id: i64, patch: LoanPatch) -> Result<Loan> {
        let mut model = LoanEntity::find_by_id(id)
            .filter(LoanColumn::AccountId.eq(self.account_id.as_str()))
            .one(&self.db)
            .await?
            .ok_or(Error::NotFound { entity: "loan", id })?
            .into_active_model();

        if let Some(paid) = patch.paid_emi_count {
            model.paid_emi_count = Set(paid);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }
        if let Some(lender) = patch.lender {
            model.lender = Set(Some(lender));
        }
        if let Some(notes) = patch.notes {
            model.notes = Set(Some(notes));
        }

        model.update(&self.db).await?.try_into()
    }
}
