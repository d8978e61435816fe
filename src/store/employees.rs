//! Employee store.

use super::RecordStore;
use crate::{
    entities::{Employee as EmployeeEntity, EmployeeColumn, employee},
    errors::Result,
    models::{Employee, NewEmployee},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct EmployeeStore {
    db: DatabaseConnection,
    account_id: String,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl From<employee::Model> for Employee {
    fn from(row: employee::Model) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
            salary: row.salary,
            start_date: row.start_date,
        }
    }
}

#[async_trait]
impl RecordStore for EmployeeStore {
    type Record = Employee;
    type Draft = NewEmployee;

    const KIND: &'static str = "employee";
    const PLURAL: &'static str = "employees";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Employee>> {
        let rows = EmployeeEntity::find()
            .filter(EmployeeColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_asc(EmployeeColumn::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewEmployee) -> Result<Employee> {
        let model = employee::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            position: Set(draft.position),
            salary: Set(draft.salary),
            start_date: Set(draft.start_date),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created employee {}", row.id);
        Ok(row.into())
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        EmployeeEntity::delete_many()
            .filter(EmployeeColumn::Id.eq(id))
            .filter(EmployeeColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
