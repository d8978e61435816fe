//! Prediction request payload and response schema.
//!
//! The service receives the dashboard aggregates plus a slice of the newest
//! transactions and answers with loosely structured insights. Every response
//! field is optional; a reply that carries only some of them is still valid.

use crate::core::summary::DashboardSummary;
use crate::models::{Category, Transaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of recent transactions sent with a request.
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_cashflow: f64,
    pub monthly_income: f64,
    pub monthly_expense: f64,
    pub monthly_profit: f64,
    pub category_breakdown: CategoryBreakdown,
    pub recent_transactions: Vec<RecentTransaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub rent: f64,
    pub salary: f64,
    pub marketing: f64,
    pub utilities: f64,
    pub courses: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: Category,
    pub amount: f64,
    pub date: NaiveDate,
}

impl From<&Transaction> for RecentTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            kind: tx.kind,
            category: tx.category,
            amount: tx.amount,
            date: tx.date,
        }
    }
}

/// Builds the request payload.
///
/// `transactions` is expected newest first, as the transaction store lists
/// them; only the first `recent` are included.
#[must_use]
pub fn financial_data(
    summary: &DashboardSummary,
    transactions: &[Transaction],
    recent: usize,
) -> FinancialData {
    FinancialData {
        total_income: summary.total_income,
        total_expenses: summary.total_expense,
        net_cashflow: summary.profit,
        monthly_income: summary.monthly_income,
        monthly_expense: summary.monthly_expense,
        monthly_profit: summary.monthly_profit(),
        category_breakdown: CategoryBreakdown {
            rent: summary.rent_total,
            salary: summary.salary_total,
            marketing: summary.marketing_total,
            utilities: summary.utilities_total,
            courses: summary.courses_revenue,
        },
        recent_transactions: transactions
            .iter()
            .take(recent)
            .map(RecentTransaction::from)
            .collect(),
    }
}

/// Insights returned by the prediction service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Predictions {
    pub six_month_growth: Option<GrowthForecast>,
    pub profit_loss: Option<ProfitLossForecast>,
    pub burn_rate: Option<BurnRate>,
    pub cash_runway: Option<CashRunway>,
    pub market_opportunities: Option<Vec<String>>,
    pub risk_assessment: Option<RiskAssessment>,
    pub summary: Option<String>,
}

impl Predictions {
    /// True when the service returned nothing displayable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthForecast {
    pub percentage: Option<f64>,
    /// "up", "down" or "stable"
    pub trend: Option<String>,
    pub analysis: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfitLossForecast {
    pub expected: Option<f64>,
    pub confidence: Option<String>,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnRate {
    pub monthly: Option<f64>,
    pub trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashRunway {
    pub months: Option<f64>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    /// "low", "medium" or "high"
    pub level: Option<String>,
    pub risks: Vec<String>,
}
