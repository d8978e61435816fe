//! Print job store.

use super::RecordStore;
use crate::{
    entities::{PrintJob as PrintJobEntity, PrintJobColumn, print_job},
    errors::Result,
    models::{NewPrintJob, PrintJob},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct PrintJobStore {
    db: DatabaseConnection,
    account_id: String,
}

impl PrintJobStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl From<print_job::Model> for PrintJob {
    fn from(row: print_job::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            filament_used: row.filament_used,
            filament_cost: row.filament_cost,
            labor_hours: row.labor_hours,
            hourly_rate: row.hourly_rate,
            electricity_cost: row.electricity_cost,
            total_cost: row.total_cost,
            date: row.date,
        }
    }
}

#[async_trait]
impl RecordStore for PrintJobStore {
    type Record = PrintJob;
    type Draft = NewPrintJob;

    const KIND: &'static str = "print job";
    const PLURAL: &'static str = "print jobs";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<PrintJob>> {
        let rows = PrintJobEntity::find()
            .filter(PrintJobColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(PrintJobColumn::Date)
            .order_by_desc(PrintJobColumn::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(PrintJob::from).collect())
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewPrintJob) -> Result<PrintJob> {
        let model = print_job::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name),
            filament_used: Set(draft.filament_used),
            filament_cost: Set(draft.filament_cost),
            labor_hours: Set(draft.labor_hours),
            hourly_rate: Set(draft.hourly_rate),
            electricity_cost: Set(draft.electricity_cost),
            total_cost: Set(draft.total_cost),
            date: Set(draft.date),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Recorded print job {} costing {}", row.id, row.total_cost);
        Ok(row.into())
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        PrintJobEntity::delete_many()
            .filter(PrintJobColumn::Id.eq(id))
            .filter(PrintJobColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
