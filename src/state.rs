//! Application state.
//!
//! [`AppState`] owns one [`Collection`] per entity kind for a single account.
//! Every operation goes through the matching store first; the in-memory
//! records only change once the store has confirmed the write. Each
//! user-triggered operation leaves a [`Notice`] behind.

use crate::{
    config::ShareholderSeed,
    core::{
        DashboardSummary, aggregate, inventory,
        loan::{self, LoanPortfolio},
        predictions::{DEFAULT_RECENT_TRANSACTIONS, Predictions, financial_data},
        printing::{PrintJobInput, expense_for, price_job},
        report::{self, SectionReports},
    },
    errors::{Error, Result},
    models::{
        Component, ComponentPatch, Employee, Loan, NewComponent, NewEmployee, NewInvestment,
        NewLoan, NewProject, NewShareholder, NewStudent, NewTransaction, PrintJob, Project,
        ProjectPatch, Shareholder, ShareholderInvestment, ShareholderPatch, Student, Transaction,
    },
    predictions::PredictionService,
    store::{
        Collection, ComponentStore, EmployeeStore, InvestmentStore, LoanStore, PrintJobStore,
        ProjectStore, RecordStore, ShareholderStore, StudentStore, TransactionStore,
    },
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Outcome message of a user-triggered operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub struct AppState {
    account_id: String,
    transactions: Collection<TransactionStore>,
    employees: Collection<EmployeeStore>,
    components: Collection<ComponentStore>,
    students: Collection<StudentStore>,
    print_jobs: Collection<PrintJobStore>,
    projects: Collection<ProjectStore>,
    loans: Collection<LoanStore>,
    shareholders: Collection<ShareholderStore>,
    investments: Collection<InvestmentStore>,
    predictions: Option<Predictions>,
    recent_transactions: usize,
    notices: Vec<Notice>,
}

impl AppState {
    /// Creates an empty state for `account_id`. Call [`Self::load_all`] to
    /// fetch the records.
    pub fn new(db: &DatabaseConnection, account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        Self {
            transactions: Collection::new(TransactionStore::new(db.clone(), &*account_id)),
            employees: Collection::new(EmployeeStore::new(db.clone(), &*account_id)),
            components: Collection::new(ComponentStore::new(db.clone(), &*account_id)),
            students: Collection::new(StudentStore::new(db.clone(), &*account_id)),
            print_jobs: Collection::new(PrintJobStore::new(db.clone(), &*account_id)),
            projects: Collection::new(ProjectStore::new(db.clone(), &*account_id)),
            loans: Collection::new(LoanStore::new(db.clone(), &*account_id)),
            shareholders: Collection::new(ShareholderStore::new(db.clone(), &*account_id)),
            investments: Collection::new(InvestmentStore::new(db.clone(), &*account_id)),
            account_id,
            predictions: None,
            recent_transactions: DEFAULT_RECENT_TRANSACTIONS,
            notices: Vec::new(),
        }
    }

    /// Sets how many of the newest transactions go into a prediction request.
    #[must_use]
    pub fn with_recent_transactions(mut self, recent: usize) -> Self {
        self.recent_transactions = recent;
        self
    }

    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Fetches every entity kind concurrently.
    ///
    /// A kind that fails to load keeps its previous records; its error is
    /// returned alongside the others and recorded as a notice.
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn load_all(&mut self) -> Vec<Error> {
        let results = tokio::join!(
            self.transactions.refresh(),
            self.employees.refresh(),
            self.components.refresh(),
            self.students.refresh(),
            self.print_jobs.refresh(),
            self.projects.refresh(),
            self.loans.refresh(),
            self.shareholders.refresh(),
            self.investments.refresh(),
        );

        let failures: Vec<Error> = [
            results.0, results.1, results.2, results.3, results.4, results.5, results.6,
            results.7, results.8,
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        for failure in &failures {
            warn!("{failure}");
            self.notices.push(Notice::error(failure.to_string()));
        }
        info!("Loaded account data with {} failure(s)", failures.len());
        failures
    }

    /// Inserts the configured shareholders when the account has none.
    #[instrument(skip(self, seeds), fields(account = %self.account_id))]
    pub async fn seed_shareholders(&mut self, seeds: &[ShareholderSeed]) -> Result<usize> {
        let result = self
            .shareholders
            .store()
            .seed_if_empty(seeds)
            .await
            .map_err(|e| Error::store("create initial shareholders", e));

        match result {
            Ok(0) => Ok(0),
            Ok(count) => {
                self.notices.push(Notice::success("Initial shareholders created"));
                if let Err(e) = self.shareholders.refresh().await {
                    warn!("{e}");
                }
                Ok(count)
            }
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// The dashboard summary; `today` picks the current month.
    #[must_use]
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        aggregate(
            self.transactions.records(),
            self.components.records(),
            self.projects.records(),
            today,
        )
    }

    #[must_use]
    pub fn reports(&self) -> SectionReports {
        let transactions = self.transactions.records();
        SectionReports {
            payroll: report::payroll_report(self.employees.records(), transactions),
            courses: report::courses_report(self.students.records(), transactions),
            school: report::school_report(transactions),
            printing: report::printing_report(self.print_jobs.records(), transactions),
            projects: report::projects_report(self.projects.records()),
            stock: report::stock_report(self.components.records(), transactions),
            shareholders: report::shareholders_report(self.shareholders.records()),
            loans: self.loan_portfolio(),
        }
    }

    #[must_use]
    pub fn loan_portfolio(&self) -> LoanPortfolio {
        loan::portfolio(self.loans.records())
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.transactions.records()
    }

    pub fn employees(&self) -> &[Employee] {
        self.employees.records()
    }

    pub fn components(&self) -> &[Component] {
        self.components.records()
    }

    pub fn students(&self) -> &[Student] {
        self.students.records()
    }

    pub fn print_jobs(&self) -> &[PrintJob] {
        self.print_jobs.records()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.records()
    }

    pub fn loans(&self) -> &[Loan] {
        self.loans.records()
    }

    pub fn shareholders(&self) -> &[Shareholder] {
        self.shareholders.records()
    }

    pub fn investments(&self) -> &[ShareholderInvestment] {
        self.investments.records()
    }

    pub const fn predictions(&self) -> Option<&Predictions> {
        self.predictions.as_ref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains the pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction> {
        let result = self.transactions.add(draft).await;
        self.notify(result, "Transaction added")
    }

    pub async fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let result = self.transactions.remove(id).await;
        self.notify(result, "Transaction deleted")
    }

    pub async fn add_employee(&mut self, draft: NewEmployee) -> Result<Employee> {
        let result = self.employees.add(draft).await;
        self.notify(result, "Employee added")
    }

    pub async fn delete_employee(&mut self, id: i64) -> Result<()> {
        let result = self.employees.remove(id).await;
        self.notify(result, "Employee deleted")
    }

    pub async fn add_component(&mut self, draft: NewComponent) -> Result<Component> {
        let result = self.components.add(draft).await;
        self.notify(result, "Component added")
    }

    pub async fn update_component(&mut self, id: i64, patch: ComponentPatch) -> Result<Component> {
        let result = self.components.patch(id, patch).await;
        self.notify(result, "Component updated")
    }

    pub async fn delete_component(&mut self, id: i64) -> Result<()> {
        let result = self.components.remove(id).await;
        self.notify(result, "Component deleted")
    }

    pub async fn add_student(&mut self, draft: NewStudent) -> Result<Student> {
        let result = self.students.add(draft).await;
        self.notify(result, "Student added")
    }

    pub async fn delete_student(&mut self, id: i64) -> Result<()> {
        let result = self.students.remove(id).await;
        self.notify(result, "Student deleted")
    }

    /// Prices and stores a print job, then books its cost as a `3d-printing`
    /// expense.
    ///
    /// Jobs that cost nothing book no expense. Once the job is stored the call
    /// succeeds: a failed expense insert is recorded as an error notice only.
    #[instrument(skip(self, input), fields(job = %input.name))]
    pub async fn add_print_job(
        &mut self,
        input: &PrintJobInput,
        date: NaiveDate,
    ) -> Result<PrintJob> {
        let draft = price_job(input, date);
        let expense = expense_for(&draft);

        let result = self.print_jobs.add(draft).await;
        let job = self.notify(result, "Print job added")?;

        if let Some(expense) = expense {
            let result = self.transactions.add(expense).await;
            if let Err(e) = self.notify(result, "Transaction added") {
                warn!("Print job {} stored without its expense: {e}", job.id);
            }
        }
        Ok(job)
    }

    pub async fn delete_print_job(&mut self, id: i64) -> Result<()> {
        let result = self.print_jobs.remove(id).await;
        self.notify(result, "Print job deleted")
    }

    pub async fn add_project(&mut self, draft: NewProject) -> Result<Project> {
        let result = self.projects.add(draft).await;
        self.notify(result, "Project added")
    }

    pub async fn update_project(&mut self, id: i64, patch: ProjectPatch) -> Result<Project> {
        let result = self.projects.patch(id, patch).await;
        self.notify(result, "Project updated")
    }

    pub async fn delete_project(&mut self, id: i64) -> Result<()> {
        let result = self.projects.remove(id).await;
        self.notify(result, "Project deleted")
    }

    /// Adds a loan; the EMI is computed from its terms when not given.
    pub async fn add_loan(&mut self, draft: NewLoan) -> Result<Loan> {
        let result = self.loans.add(draft).await;
        self.notify(result, "Loan added")
    }

    /// Records one more paid installment on a loan.
    #[instrument(skip(self))]
    pub async fn pay_emi(&mut self, id: i64) -> Result<Loan> {
        let patch = self
            .loans
            .get(id)
            .ok_or(Error::NotFound { entity: "loan", id })
            .and_then(loan::next_payment);

        let result = match patch {
            Ok(patch) => self.loans.patch(id, patch).await,
            Err(e) => Err(e),
        };
        self.notify(result, "EMI payment recorded")
    }

    pub async fn delete_loan(&mut self, id: i64) -> Result<()> {
        let result = self.loans.remove(id).await;
        self.notify(result, "Loan removed")
    }

    pub async fn add_shareholder(&mut self, draft: NewShareholder) -> Result<Shareholder> {
        let result = self.shareholders.add(draft).await;
        self.notify(result, "Shareholder added")
    }

    pub async fn update_shareholder(
        &mut self,
        id: i64,
        patch: ShareholderPatch,
    ) -> Result<Shareholder> {
        let result = self.shareholders.patch(id, patch).await;
        self.notify(result, "Shareholder updated")
    }

    /// Deletes a shareholder and its investments.
    pub async fn delete_shareholder(&mut self, id: i64) -> Result<()> {
        let result = self.shareholders.remove(id).await;
        if result.is_ok() {
            Self::refresh_quietly(&mut self.investments).await;
        }
        self.notify(result, "Shareholder removed")
    }

    /// Records an investment and refreshes the shareholder totals.
    pub async fn record_investment(
        &mut self,
        draft: NewInvestment,
    ) -> Result<ShareholderInvestment> {
        let result = self.investments.add(draft).await;
        if result.is_ok() {
            Self::refresh_quietly(&mut self.shareholders).await;
        }
        self.notify(result, "Investment recorded")
    }

    pub async fn delete_investment(&mut self, id: i64) -> Result<()> {
        let result = self.investments.remove(id).await;
        if result.is_ok() {
            Self::refresh_quietly(&mut self.shareholders).await;
        }
        self.notify(result, "Investment deleted")
    }

    /// The current inventory as CSV text.
    pub fn export_inventory_csv(&self) -> Result<String> {
        inventory::export_inventory_csv(self.components.records())
    }

    /// Requests fresh predictions for the current aggregates.
    ///
    /// On failure the previously shown predictions are kept.
    #[instrument(skip(self, service), fields(account = %self.account_id))]
    pub async fn regenerate_predictions<P>(
        &mut self,
        service: &P,
        today: NaiveDate,
    ) -> Result<&Predictions>
    where
        P: PredictionService + ?Sized,
    {
        let data = financial_data(
            &self.summary(today),
            self.transactions.records(),
            self.recent_transactions,
        );

        match service.predict(&data).await {
            Ok(predictions) => {
                self.notices
                    .push(Notice::success("Predictions generated successfully"));
                Ok(&*self.predictions.insert(predictions))
            }
            Err(e) => {
                warn!("Prediction request failed: {e}");
                self.notices.push(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }

    fn notify<T>(&mut self, result: Result<T>, success: &str) -> Result<T> {
        match &result {
            Ok(_) => self.notices.push(Notice::success(success)),
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
        result
    }

    /// Refetches a related kind after a write that changed it as a side effect.
    async fn refresh_quietly<S: RecordStore>(collection: &mut Collection<S>) {
        if let Err(e) = collection.refresh().await {
            warn!("{e}");
        }
    }
}
