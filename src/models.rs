//! Domain records.
//!
//! These are the in-memory shapes the dashboard works with. They serialize with
//! camelCase field names; the storage schema uses snake_case and is mapped by
//! the stores in [`crate::store`].

use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anything the stores hand out carries a store-assigned id.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Input checks run before a draft or patch is sent to a store.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::validation(format!(
                "Unknown transaction type '{other}'"
            ))),
        }
    }
}

/// How a category is bucketed in the dashboard summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Income and expense rows are summed together.
    Net,
    /// Only income rows count.
    RevenueOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Rent,
    Salary,
    Marketing,
    General,
    Stock,
    #[serde(rename = "3d-printing")]
    ThreeDPrinting,
    Courses,
    School,
    Projects,
    Utilities,
    Transfer,
    Other,
}

impl Category {
    pub const ALL: [Self; 12] = [
        Self::Rent,
        Self::Salary,
        Self::Marketing,
        Self::General,
        Self::Stock,
        Self::ThreeDPrinting,
        Self::Courses,
        Self::School,
        Self::Projects,
        Self::Utilities,
        Self::Transfer,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Salary => "salary",
            Self::Marketing => "marketing",
            Self::General => "general",
            Self::Stock => "stock",
            Self::ThreeDPrinting => "3d-printing",
            Self::Courses => "courses",
            Self::School => "school",
            Self::Projects => "projects",
            Self::Utilities => "utilities",
            Self::Transfer => "transfer",
            Self::Other => "other",
        }
    }

    /// The summary policy for categories that have their own dashboard field.
    ///
    /// Cost-style categories net both transaction types together while the
    /// revenue categories ignore expense rows. Whether the asymmetry is
    /// wanted is a product decision; the observed behaviour is kept.
    #[must_use]
    pub const fn summary_policy(self) -> Option<CategoryPolicy> {
        match self {
            Self::Rent | Self::Salary | Self::Marketing | Self::Utilities | Self::Transfer => {
                Some(CategoryPolicy::Net)
            }
            Self::ThreeDPrinting | Self::Courses | Self::School => {
                Some(CategoryPolicy::RevenueOnly)
            }
            Self::General | Self::Stock | Self::Projects | Self::Other => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown category '{s}'")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<()> {
        validate_positive(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
    pub salary: f64,
    pub start_date: NaiveDate,
}

impl Validate for NewEmployee {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        validate_non_negative(self.salary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: i64,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub min_stock: i32,
    pub category: String,
}

impl Component {
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

pub const DEFAULT_MIN_STOCK: i32 = 5;
pub const DEFAULT_COMPONENT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    /// Falls back to [`DEFAULT_MIN_STOCK`].
    #[serde(default)]
    pub min_stock: Option<i32>,
    /// Falls back to [`DEFAULT_COMPONENT_CATEGORY`] when absent or blank.
    #[serde(default)]
    pub category: Option<String>,
}

impl NewComponent {
    #[must_use]
    pub fn min_stock_or_default(&self) -> i32 {
        self.min_stock.unwrap_or(DEFAULT_MIN_STOCK)
    }

    #[must_use]
    pub fn category_or_default(&self) -> String {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COMPONENT_CATEGORY)
            .to_string()
    }
}

impl Validate for NewComponent {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        validate_quantity(self.quantity)?;
        validate_non_negative(self.unit_price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPatch {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<f64>,
    pub min_stock: Option<i32>,
    pub category: Option<String>,
}

impl Validate for ComponentPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = self.unit_price {
            validate_non_negative(price)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(Error::validation(format!(
                "Unknown payment status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub course: String,
    pub batch_id: Option<String>,
    pub enrollment_date: NaiveDate,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub course: String,
    #[serde(default)]
    pub batch_id: Option<String>,
    pub enrollment_date: NaiveDate,
    pub payment_status: PaymentStatus,
}

impl Validate for NewStudent {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        if self.course.trim().is_empty() {
            return Err(Error::validation("Course is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    pub id: i64,
    pub name: String,
    pub filament_used: f64,
    pub filament_cost: f64,
    pub labor_hours: f64,
    pub hourly_rate: f64,
    pub electricity_cost: f64,
    pub total_cost: f64,
    pub date: NaiveDate,
}

/// A print job with its costs already worked out, see
/// [`crate::core::printing::price_job`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrintJob {
    pub name: String,
    pub filament_used: f64,
    pub filament_cost: f64,
    pub labor_hours: f64,
    pub hourly_rate: f64,
    pub electricity_cost: f64,
    pub total_cost: f64,
    pub date: NaiveDate,
}

impl Validate for NewPrintJob {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        for value in [
            self.filament_used,
            self.filament_cost,
            self.labor_hours,
            self.hourly_rate,
            self.electricity_cost,
            self.total_cost,
        ] {
            validate_non_negative(value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Paused,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            other => Err(Error::validation(format!(
                "Unknown project status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub total_cost: f64,
    pub total_income: f64,
    pub hours_spent: f64,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
}

impl Project {
    #[must_use]
    pub fn profit(&self) -> f64 {
        self.total_income - self.total_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub total_cost: f64,
    pub total_income: f64,
    pub hours_spent: f64,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
}

impl Validate for NewProject {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        validate_non_negative(self.total_cost)?;
        validate_non_negative(self.total_income)?;
        validate_non_negative(self.hours_spent)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_cost: Option<f64>,
    pub total_income: Option<f64>,
    pub hours_spent: Option<f64>,
    pub status: Option<ProjectStatus>,
}

impl Validate for ProjectPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_name(name)?;
        }
        for value in [self.total_cost, self.total_income, self.hours_spent]
            .into_iter()
            .flatten()
        {
            validate_non_negative(value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Completed,
}

impl LoanStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for LoanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(Error::validation(format!("Unknown loan status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub name: String,
    pub principal_amount: f64,
    /// Annual interest rate in percent.
    pub interest_rate: f64,
    pub total_emi_count: i32,
    pub paid_emi_count: i32,
    pub emi_amount: f64,
    pub start_date: NaiveDate,
    pub lender: Option<String>,
    pub notes: Option<String>,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub name: String,
    pub principal_amount: f64,
    pub interest_rate: f64,
    pub total_emi_count: i32,
    /// Computed with [`crate::core::loan::emi`] when absent.
    #[serde(default)]
    pub emi_amount: Option<f64>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub lender: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for NewLoan {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        validate_positive(self.principal_amount)?;
        validate_non_negative(self.interest_rate)?;
        if self.total_emi_count < 1 {
            return Err(Error::validation("A loan needs at least one EMI"));
        }
        if let Some(emi) = self.emi_amount {
            validate_non_negative(emi)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPatch {
    pub paid_emi_count: Option<i32>,
    pub status: Option<LoanStatus>,
    pub lender: Option<String>,
    pub notes: Option<String>,
}

impl Validate for LoanPatch {
    fn validate(&self) -> Result<()> {
        if matches!(self.paid_emi_count, Some(count) if count < 0) {
            return Err(Error::validation("Paid EMI count cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shareholder {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub ownership_percentage: f64,
    pub total_invested: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShareholder {
    pub name: String,
    pub designation: String,
    pub ownership_percentage: f64,
    #[serde(default)]
    pub total_invested: f64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for NewShareholder {
    fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        validate_percentage(self.ownership_percentage)?;
        validate_non_negative(self.total_invested)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareholderPatch {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub ownership_percentage: Option<f64>,
    pub total_invested: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
}

impl Validate for ShareholderPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            require_name(name)?;
        }
        if let Some(pct) = self.ownership_percentage {
            validate_percentage(pct)?;
        }
        if let Some(total) = self.total_invested {
            validate_non_negative(total)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareholderInvestment {
    pub id: i64,
    pub shareholder_id: i64,
    pub amount: f64,
    pub investment_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub shareholder_id: i64,
    pub amount: f64,
    pub investment_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl Validate for NewInvestment {
    fn validate(&self) -> Result<()> {
        validate_positive(self.amount)
    }
}

macro_rules! impl_identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_identified!(
    Transaction,
    Employee,
    Component,
    Student,
    PrintJob,
    Project,
    Loan,
    Shareholder,
    ShareholderInvestment,
);

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Please fill in all required fields"));
    }
    Ok(())
}

fn validate_positive(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_non_negative(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<()> {
    if quantity < 0 {
        return Err(Error::validation("Quantity cannot be negative"));
    }
    Ok(())
}

fn validate_percentage(pct: f64) -> Result<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(Error::validation(
            "Ownership percentage must be between 0 and 100",
        ));
    }
    Ok(())
}
