//! Student store.

use super::{RecordStore, parse_column};
use crate::{
    entities::{Student as StudentEntity, StudentColumn, student},
    errors::{Error, Result},
    models::{NewStudent, Student},
};
use async_trait::async_trait;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct StudentStore {
    db: DatabaseConnection,
    account_id: String,
}

impl StudentStore {
    pub fn new(db: DatabaseConnection, account_id: impl Into<String>) -> Self {
        Self {
            db,
            account_id: account_id.into(),
        }
    }
}

impl TryFrom<student::Model> for Student {
    type Error = Error;

    fn try_from(row: student::Model) -> Result<Self> {
        Ok(Self {
            id: row.id,
            payment_status: parse_column("students", &row.payment_status)?,
            name: row.name,
            email: row.email,
            course: row.course,
            batch_id: row.batch_id,
            enrollment_date: row.enrollment_date,
        })
    }
}

#[async_trait]
impl RecordStore for StudentStore {
    type Record = Student;
    type Draft = NewStudent;

    const KIND: &'static str = "student";
    const PLURAL: &'static str = "students";

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn list(&self) -> Result<Vec<Student>> {
        StudentEntity::find()
            .filter(StudentColumn::AccountId.eq(self.account_id.as_str()))
            .order_by_asc(StudentColumn::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Student::try_from)
            .collect()
    }

    #[instrument(skip(self, draft), fields(account = %self.account_id))]
    async fn create(&self, draft: NewStudent) -> Result<Student> {
        let model = student::ActiveModel {
            account_id: Set(self.account_id.clone()),
            name: Set(draft.name.trim().to_string()),
            email: Set(draft.email.filter(|e| !e.trim().is_empty())),
            course: Set(draft.course),
            batch_id: Set(draft.batch_id),
            enrollment_date: Set(draft.enrollment_date),
            payment_status: Set(draft.payment_status.as_str().to_string()),
            ..Default::default()
        };

        let row = model.insert(&self.db).await?;
        debug!("Enrolled student {}", row.id);
        row.try_into()
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn delete(&self, id: i64) -> Result<()> {
        StudentEntity::delete_many()
            .filter(StudentColumn::Id.eq(id))
            .filter(StudentColumn::AccountId.eq(self.account_id.as_str()))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::PaymentStatus;
    use crate::test_utils::{new_student, setup_test_db};

    #[tokio::test]
    async fn test_create_and_list() -> Result<()> {
        let db = setup_test_db().await?;
        let store = StudentStore::new(db, "acct");

        store.create(new_student("Maria Garcia", PaymentStatus::Pending)).await?;
        let alex = store.create(new_student("Alex Chen", PaymentStatus::Paid)).await?;

        let listed = store.list().await?;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, alex.id);
        assert_eq!(listed[1].payment_status, PaymentStatus::Pending);
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_email_is_stored_as_none() -> Result<()> {
        let db = setup_test_db().await?;
        let store = StudentStore::new(db, "acct");

        let mut draft = new_student("Alex Chen", PaymentStatus::Paid);
        draft.email = Some("  ".to_string());
        let created = store.create(draft).await?;
        assert_eq!(created.email, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_payment_status_row_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        student::ActiveModel {
            account_id: Set("acct".to_string()),
            name: Set("Alex Chen".to_string()),
            email: Set(None),
            course: Set("Robotics Fundamentals".to_string()),
            batch_id: Set(None),
            enrollment_date: Set(crate::test_utils::date(2024, 11, 1)),
            payment_status: Set("waived".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let store = StudentStore::new(db, "acct");
        assert!(matches!(
            store.list().await,
            Err(Error::InvalidRecord { table: "students", .. })
        ));
        Ok(())
    }
}
