//! Shared test utilities.
//!
//! In-memory database setup, draft builders with sensible defaults, and fakes
//! for the store and prediction seams.

use crate::{
    core::predictions::{FinancialData, Predictions},
    errors::{Error, Result},
    models::{
        Category, NewComponent, NewEmployee, NewLoan, NewProject, NewShareholder, NewStudent,
        NewTransaction, PaymentStatus, ProjectStatus, Transaction, TransactionType,
    },
    predictions::PredictionService,
    store::RecordStore,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Shorthand for a calendar date; panics on an invalid one.
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A transaction draft dated 2024-12-05.
pub fn new_transaction(kind: TransactionType, category: Category, amount: f64) -> NewTransaction {
    NewTransaction {
        kind,
        category,
        amount,
        description: format!("{} {}", category, kind.as_str()),
        date: date(2024, 12, 5),
    }
}

pub fn new_employee(name: &str, salary: f64) -> NewEmployee {
    NewEmployee {
        name: name.to_string(),
        position: "Engineer".to_string(),
        salary,
        start_date: date(2024, 1, 15),
    }
}

/// A component draft in the "Sensors" category with a reorder threshold of 5.
pub fn new_component(name: &str, quantity: i32, unit_price: f64) -> NewComponent {
    NewComponent {
        name: name.to_string(),
        quantity,
        unit_price,
        min_stock: Some(5),
        category: Some("Sensors".to_string()),
    }
}

pub fn new_student(name: &str, payment_status: PaymentStatus) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        course: "Robotics Fundamentals".to_string(),
        batch_id: Some("B001".to_string()),
        enrollment_date: date(2024, 11, 1),
        payment_status,
    }
}

/// An active project started 2024-10-01 with 40 hours logged.
pub fn new_project(name: &str, total_cost: f64, total_income: f64) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: String::new(),
        total_cost,
        total_income,
        hours_spent: 40.0,
        status: ProjectStatus::Active,
        start_date: date(2024, 10, 1),
    }
}

/// A loan draft without an explicit EMI amount.
pub fn new_loan(name: &str, principal: f64, rate: f64, emi_count: i32) -> NewLoan {
    NewLoan {
        name: name.to_string(),
        principal_amount: principal,
        interest_rate: rate,
        total_emi_count: emi_count,
        emi_amount: None,
        start_date: date(2024, 1, 1),
        lender: Some("City Bank".to_string()),
        notes: None,
    }
}

pub fn new_shareholder(name: &str, ownership_percentage: f64) -> NewShareholder {
    NewShareholder {
        name: name.to_string(),
        designation: "Director".to_string(),
        ownership_percentage,
        total_invested: 0.0,
        email: None,
        phone: None,
    }
}

/// In-memory transaction store whose writes and lists can be made to fail.
#[derive(Default)]
pub struct FakeTransactionStore {
    records: Mutex<Vec<Transaction>>,
    next_id: AtomicUsize,
    fail_writes: AtomicBool,
    fail_lists: AtomicBool,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
}

impl FakeTransactionStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> Error {
        Error::Database(sea_orm::DbErr::Custom("store unavailable".to_string()))
    }
}

#[async_trait]
#[allow(clippy::unwrap_used)]
impl RecordStore for FakeTransactionStore {
    type Record = Transaction;
    type Draft = NewTransaction;

    const KIND: &'static str = "transaction";
    const PLURAL: &'static str = "transactions";

    async fn list(&self) -> Result<Vec<Transaction>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, draft: NewTransaction) -> Result<Transaction> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let id = i64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap();
        let record = Transaction {
            id,
            kind: draft.kind,
            category: draft.category,
            amount: draft.amount,
            description: draft.description,
            date: draft.date,
            created_at: chrono::Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

type ErrorFactory = Box<dyn Fn() -> Error + Send + Sync>;

/// Prediction service returning a canned answer and remembering the request.
pub struct FakePredictionService {
    outcome: std::result::Result<Predictions, ErrorFactory>,
    last_request: Mutex<Option<FinancialData>>,
}

impl FakePredictionService {
    pub fn succeeding(predictions: Predictions) -> Self {
        Self {
            outcome: Ok(predictions),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        Self {
            outcome: Err(Box::new(error)),
            last_request: Mutex::new(None),
        }
    }

    #[allow(clippy::unwrap_used)]
    pub fn last_request(&self) -> Option<FinancialData> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionService for FakePredictionService {
    #[allow(clippy::unwrap_used)]
    async fn predict(&self, data: &FinancialData) -> Result<Predictions> {
        *self.last_request.lock().unwrap() = Some(data.clone());
        match &self.outcome {
            Ok(predictions) => Ok(predictions.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}
