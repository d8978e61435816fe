//! Transaction store.

use super::{RecordStore, parse_column};
use crate::{
    entities::{Transaction as TransactionEntity, TransactionColumn, transaction},
    errors::{Error, Result},
    models::{NewTransaction, Transaction},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

const TABLE: &str = "transactions";

#[derive(Debug, Clone)]
pub struct TransactionStore {
    db: DatabaseConnection,
    account_id: String,
}

impl TransactionStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl TryFrom<transaction::Model> for Transaction {
    type Error = Error;

    fn try_from(row: transaction::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            kind: parse_column(TABLE, &row.transaction_type)?,
            category: parse_column(TABLE, &row.category)?,
            amount: row.amount,
            description: row.description,
            date: row.date,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl RecordStore for TransactionStore {
    type Record = Transaction;
    type Draft = NewTransaction;

    const KIND: &'static str = "transaction";
    const PLURAL: &'static str = "transactions";

    /// Newest first by date, then by insertion.
    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Transaction>> {
        TransactionEntity::find()
            .filter(TransactionColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(TransactionColumn::Date)
            .order_by_desc(TransactionColumn::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewTransaction) -> Result<Transaction> {
        let model = transaction::ActiveModel {
            account_id: Set(self.account_id.clone()),
            transaction_type: Set(draft.kind.as_str().to_string()),
            category: Set(draft.category.as_str().to_string()),
            amount: Set(draft.amount),
            description: Set(draft.description),
            date: Set(draft.date),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created transaction {}", row.id);
        row.try_into()
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        let result = TransactionEntity::delete_many()
            .filter(TransactionColumn::Id.eq(id))
            .filter(TransactionColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        debug!("Deleted {} transaction row(s)", result.rows_affected);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::{Category, TransactionType};
    use crate::store::Collection;
    use crate::test_utils::{date, new_transaction, setup_test_db};

    #[tokio::test]
    async fn test_create_and_list_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let store = TransactionStore::new(db, "acct");

        let mut older = new_transaction(TransactionType::Expense, Category::Rent, 2500.0);
        older.date = date(2024, 11, 1);
        let mut newer = new_transaction(TransactionType::Income, Category::Courses, 4500.0);
        newer.date = date(2024, 12, 5);

        store.create(older).await?;
        let created = store.create(newer).await?;
        assert_eq!(created.category, Category::Courses);

        let listed = store.list().await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[1].amount, 2500.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_account() -> Result<()> {
        let db = setup_test_db().await?;
        let mine = TransactionStore::new(db.clone(), "mine");
        let theirs = TransactionStore::new(db, "theirs");

        mine.create(new_transaction(TransactionType::Income, Category::School, 100.0))
            .await?;

        assert_eq!(mine.list().await?.len(), 1);
        assert!(theirs.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let store = TransactionStore::new(db, "acct");
        let created = store
            .create(new_transaction(TransactionType::Expense, Category::Marketing, 950.0))
            .await?;

        store.delete(created.id).await?;
        store.delete(created.id).await?;
        store.delete(424_242).await?;
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_leaves_other_accounts_alone() -> Result<()> {
        let db = setup_test_db().await?;
        let mine = TransactionStore::new(db.clone(), "mine");
        let theirs = TransactionStore::new(db, "theirs");
        let created = mine
            .create(new_transaction(TransactionType::Income, Category::Other, 10.0))
            .await?;

        theirs.delete(created.id).await?;
        assert_eq!(mine.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_category_row_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        transaction::ActiveModel {
            account_id: Set("acct".to_string()),
            transaction_type: Set("income".to_string()),
            category: Set("groceries".to_string()),
            amount: Set(1.0),
            description: Set(String::new()),
            date: Set(date(2024, 12, 1)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let store = TransactionStore::new(db, "acct");
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { table: "transactions", .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_the_database() -> Result<()> {
        let db = setup_test_db().await?;
        let mut transactions = Collection::new(TransactionStore::new(db, "acct"));

        for amount in [0.0, -15.0, f64::NAN] {
            let draft = new_transaction(TransactionType::Expense, Category::Rent, amount);
            let err = transactions.add(draft).await.unwrap_err();
            assert!(matches!(err, Error::InvalidAmount { .. }));
        }

        assert!(transactions.records().is_empty());
        assert!(transactions.store().list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_type_row_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        transaction::ActiveModel {
            account_id: Set("acct".to_string()),
            transaction_type: Set("refund".to_string()),
            category: Set("rent".to_string()),
            amount: Set(10.0),
            description: Set(String::new()),
            date: Set(date(2024, 12, 1)),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let err = TransactionStore::new(db, "acct").list().await.unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { table: "transactions", .. }));
        Ok(())
    }
}
