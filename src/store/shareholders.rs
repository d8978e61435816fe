//! Shareholder and investment stores.
//!
//! Recording or deleting an investment adjusts the shareholder's
//! `total_invested` inside the same database transaction. The total can also
//! be entered directly when a shareholder is created or patched, so it is not
//! derived from the investment rows.

use super::{PatchableStore, RecordStore};
use crate::{
    config::ShareholderSeed,
    entities::{
        Shareholder as ShareholderEntity, ShareholderColumn,
        ShareholderInvestment as InvestmentEntity, ShareholderInvestmentColumn as InvestmentColumn,
        shareholder, shareholder_investment,
    },
    errors::{Error, Result},
    models::{NewInvestment, NewShareholder, Shareholder, ShareholderInvestment, ShareholderPatch},
};
use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, IntoActiveModel, PaginatorTrait, QueryOrder, Set, TransactionTrait,
    prelude::*,
};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone)]
pub struct ShareholderStore {
    db: DatabaseConnection,
    account_id: String,
}

impl ShareholderStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }

    /// Inserts the seed shareholders when the account has none yet.
    ///
    /// Returns how many were inserted.
    #[instrument(skip(self, seeds), fields(account = %self.account_id))]
    pub async fn seed_if_empty(&self, seeds: &[ShareholderSeed]) -> Result<usize> {
        let existing = ShareholderEntity::find()
            .filter(ShareholderColumn::AccountId.eq(self.account_id.as_str()))
            .count(&self.db)
            .await?;
        if existing > 0 || seeds.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;

        for seed in seeds {
            shareholder::ActiveModel {
                account_id: Set(self.account_id.clone()),
                name: Set(seed.name.clone()),
                designation: Set(seed.designation.clone()),
                ownership_percentage: Set(seed.ownership_percentage),
                total_invested: Set(0.0),
                email: Set(None),
                phone: Set(None),
                photo_url: Set(None),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        info!("Seeded {} shareholders", seeds.len());
        Ok(seeds.len())
    }
}

impl From<shareholder::Model> for Shareholder {
    fn from(row: shareholder::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            designation: row.designation,
            ownership_percentage: row.ownership_percentage,
            total_invested: row.total_invested,
            email: row.email,
            phone: row.phone,
            photo_url: row.photo_url,
        }
    }
}

#[async_trait]
impl RecordStore for ShareholderStore {
    type Record = Shareholder;
    type Draft = NewShareholder;

    const KIND: &'static str = "shareholder";
    const PLURAL: &'static str = "shareholders";

    /// Largest ownership first.
    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Shareholder>> {
        let rows = ShareholderEntity::find()
            .filter(ShareholderColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(ShareholderColumn::OwnershipPercentage)
            .order_by_asc(ShareholderColumn::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Shareholder::from).collect())
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewShareholder) -> Result<Shareholder> {
        let model = shareholder::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            designation: Set(draft.designation),
            ownership_percentage: Set(draft.ownership_percentage),
            total_invested: Set(draft.total_invested),
            email: Set(draft.email),
            phone: Set(draft.phone),
            photo_url: Set(None),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created shareholder {}", row.id);
        Ok(row.into())
    }

    /// Removes the shareholder together with its investments.
    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        InvestmentEntity::delete_many()
            .filter(InvestmentColumn::ShareholderId.eq(id))
            .filter(InvestmentColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&txn)
            .await?;
        ShareholderEntity::delete_many()
            .filter(ShareholderColumn::Id.eq(id))
            .filter(ShareholderColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl PatchableStore for ShareholderStore {
    type Patch = ShareholderPatch;

    #[instrument(skip(self, patch), fields(account = %self.account_id))]
    async fn update(&self, id: i64, patch: ShareholderPatch) -> Result<Shareholder> {
        let mut model = find_shareholder(&self.db, &self.account_id, id)
            .await?
            .into_active_model();

        if let Some(name) = patch.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(designation) = patch.designation {
            model.designation = Set(designation);
        }
        if let Some(pct) = patch.ownership_percentage {
            model.ownership_percentage = Set(pct);
        }
        if let Some(total) = patch.total_invested {
            model.total_invested = Set(total);
        }
        if let Some(email) = patch.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = patch.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(photo_url) = patch.photo_url {
            model.photo_url = Set(Some(photo_url));
        }

        Ok(model.update(&self.db).await?.into())
    }
}

/// Capital contributions of the account's shareholders.
#[derive(Debug, Clone)]
pub struct InvestmentStore {
    db: DatabaseConnection,
    account_id: String,
}

impl InvestmentStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl From<shareholder_investment::Model> for ShareholderInvestment {
    fn from(row: shareholder_investment::Model) -> Self {
        Self {
            id: row.id,
            shareholder_id: row.shareholder_id,
            amount: row.amount,
            investment_date: row.investment_date,
            description: row.description,
        }
    }
}

#[async_trait]
impl RecordStore for InvestmentStore {
    type Record = ShareholderInvestment;
    type Draft = NewInvestment;

    const KIND: &'static str = "investment";
    const PLURAL: &'static str = "investments";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<ShareholderInvestment>> {
        let rows = InvestmentEntity::find()
            .filter(InvestmentColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(InvestmentColumn::InvestmentDate)
            .order_by_desc(InvestmentColumn::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(ShareholderInvestment::from).collect())
    }

    /// Records the investment and raises the shareholder's total.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] when the shareholder does not belong to the
    /// account; nothing is written in that case.
    #[instrument(
        skip(self, draft),
        fields(account = %self.account_id, shareholder = draft.shareholder_id)
    )]
    async fn create(&self, draft: NewInvestment) -> Result<ShareholderInvestment> {
        let txn = self.db.begin().await?;

        let holder = find_shareholder(&txn, &self.account_id, draft.shareholder_id).await?;
        let new_total = holder.total_invested + draft.amount;

        let row = shareholder_investment::ActiveModel {
            account_id: Set(self.account_id.clone()),
            shareholder_id: Set(draft.shareholder_id),
            amount: Set(draft.amount),
            investment_date: Set(draft.investment_date),
            description: Set(draft.description.filter(|d| !d.trim().is_empty())),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut holder = holder.into_active_model();
        holder.total_invested = Set(new_total);
        holder.update(&txn).await?;

        txn.commit().await?;
        debug!("Recorded investment {}; total invested now {}", row.id, new_total);
        Ok(row.into())
    }

    /// Removes the investment and lowers the shareholder's total.
    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;

        let Some(investment) = InvestmentEntity::find_by_id(id)
            .filter(InvestmentColumn::AccountId.eq(self.account_id.as_str()))
            .one(&txn)
            .await?
        else {
            return Ok(());
        };

        if let Some(holder) = ShareholderEntity::find_by_id(investment.shareholder_id)
            .one(&txn)
            .await?
        {
            let new_total = holder.total_invested - investment.amount;
            let mut holder = holder.into_active_model();
            holder.total_invested = Set(new_total);
            holder.update(&txn).await?;
        }
        investment.delete(&txn).await?;

        txn.commit().await?;
        Ok(())
    }
}

async fn find_shareholder<C: ConnectionTrait>(
    conn: &C,
    account_id: &str,
    id: i64,
) -> Result<shareholder::Model> {
    ShareholderEntity::find_by_id(id)
        .filter(ShareholderColumn::AccountId.eq(account_id))
        .one(conn)
        .await?
        .ok_or(Error::NotFound {
            entity: "shareholder",
            id,
        })
}
