//! Project store.

use super::{PatchableStore, RecordStore, parse_column};
use crate::{
    entities::{Project as ProjectEntity, ProjectColumn, project},
    errors::{Error, Result},
    models::{NewProject, Project, ProjectPatch},
};
use async_trait::async_trait;
use sea_orm::{IntoActiveModel, QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct ProjectStore {
    db: DatabaseConnection,
    account_id: String,
}

impl ProjectStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl TryFrom<project::Model> for Project {
    type Error = Error;

    fn try_from(row: project::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            status: parse_column("projects", &row.status)?,
            name: row.name,
            description: row.description,
            total_cost: row.total_cost,
            total_income: row.total_income,
            hours_spent: row.hours_spent,
            start_date: row.start_date,
        })
    }
}

#[async_trait]
impl RecordStore for ProjectStore {
    type Record = Project;
    type Draft = NewProject;

    const KIND: &'static str = "project";
    const PLURAL: &'static str = "projects";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Project>> {
        ProjectEntity::find()
            .filter(ProjectColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_desc(ProjectColumn::StartDate)
            .order_by_desc(ProjectColumn::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Project::try_from)
            .collect()
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewProject) -> Result<Project> {
        let model = project::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            description: Set(draft.description),
            total_cost: Set(draft.total_cost),
            total_income: Set(draft.total_income),
            hours_spent: Set(draft.hours_spent),
            status: Set(draft.status.as_str().to_string()),
            start_date: Set(draft.start_date),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Created project {}", row.id);
        row.try_into()
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        ProjectEntity::delete_many()
            .filter(ProjectColumn::Id.eq(id))
            .filter(ProjectColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PatchableStore for ProjectStore {
    type Patch = ProjectPatch;

    #[instrument(skip(self, patch), fields(account = %self.account_id))]
    async fn update(&self, id: i64, patch: ProjectPatch) -> Result<Project> {
        let mut model = ProjectEntity::find_by_id(id)
            .filter(ProjectColumn::AccountId.eq(self.account_id.as_str()))
            .one(&self.db)
            .await?
            .ok_or(Error::NotFound {
                entity: "project",
                id,
            })?
            .into_active_model();

        if let Some(name) = patch.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = patch.description {
            model.description = Set(description);
        }
        if let Some(total_cost) = patch.total_cost {
            model.total_cost = Set(total_cost);
        }
        if let Some(total_income) = patch.total_income {
            model.total_income = Set(total_income);
        }
        if let Some(hours_spent) = patch.hours_spent {
            model.hours_spent = Set(hours_spent);
        }
        if let Some(status) = patch.status {
            model.status = Set(status.as_str().to_string());
        }

        model.update(&self.db).await?.try_into()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::ProjectStatus;
    use crate::test_utils::{date, new_project, setup_test_db};

    #[tokio::test]
    async fn test_list_newest_start_first() -> Result<()> {
        let db = setup_test_db().await?;
        let store = ProjectStore::new(db, "acct");

        let mut older = new_project("Home Automation System", 450.0, 1200.0);
        older.start_date = date(2024, 9, 1);
        let mut newer = new_project("Industrial Monitoring", 800.0, 0.0);
        newer.start_date = date(2024, 11, 15);
        store.create(older).await?;
        store.create(newer).await?;

        let listed = store.list().await?;
        assert_eq!(listed[0].name, "Industrial Monitoring");
        assert_eq!(listed[1].profit(), 750.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_status_and_income() -> Result<()> {
        let db = setup_test_db().await?;
        let store = ProjectStore::new(db, "acct");
        let created = store.create(new_project("Industrial Monitoring", 800.0, 0.0)).await?;

        let updated = store
            .update(
                created.id,
                ProjectPatch {
                    total_income: Some(1500.0),
                    status: Some(ProjectStatus::Completed),
                    ..Default::default()
                },
            )
            .await?;

        assert_eq!(updated.status, ProjectStatus::Completed);
        assert_eq!(updated.profit(), 700.0);
        assert_eq!(updated.hours_spent, created.hours_spent);
        Ok(())
    }
}
