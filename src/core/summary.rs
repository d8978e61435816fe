//! Dashboard summary aggregation.
//!
//! Turns the current transaction, component and project collections into the
//! headline figures shown on the dashboard. Everything here is a pure function of
//! its inputs: no ordering is assumed, nothing is mutated, and the summary is
//! cheap enough to recompute on every read.

use crate::models::{Category, CategoryPolicy, Component, Project, Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Derived headline metrics. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub profit: f64,
    pub rent_total: f64,
    pub salary_total: f64,
    pub marketing_total: f64,
    pub utilities_total: f64,
    pub stock_value: f64,
    pub print_jobs_revenue: f64,
    pub courses_revenue: f64,
    pub school_revenue: f64,
    pub transfer_total: f64,
    pub projects_profit: f64,
    pub monthly_income: f64,
    pub monthly_expense: f64,
}

impl DashboardSummary {
    #[must_use]
    pub fn monthly_profit(&self) -> f64 {
        self.monthly_income - self.monthly_expense
    }
}

/// Computes the dashboard summary.
///
/// `today` decides which calendar month counts as "this month" for the
/// monthly fields. Empty collections give an all-zero summary.
#[must_use]
pub fn aggregate(
    transactions: &[Transaction],
    components: &[Component],
    projects: &[Project],
    today: NaiveDate,
) -> DashboardSummary {
    let total_income = sum_by_type(transactions, TransactionType::Income);
    let total_expense = sum_by_type(transactions, TransactionType::Expense);

    let this_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| same_month(t.date, today))
        .collect();

    DashboardSummary {
        total_income,
        total_expense,
        profit: total_income - total_expense,
        rent_total: category_total(transactions, Category::Rent),
        salary_total: category_total(transactions, Category::Salary),
        marketing_total: category_total(transactions, Category::Marketing),
        utilities_total: category_total(transactions, Category::Utilities),
        stock_value: components.iter().map(Component::stock_value).sum(),
        print_jobs_revenue: category_total(transactions, Category::ThreeDPrinting),
        courses_revenue: category_total(transactions, Category::Courses),
        school_revenue: category_total(transactions, Category::School),
        transfer_total: category_total(transactions, Category::Transfer),
        projects_profit: projects.iter().map(Project::profit).sum(),
        monthly_income: sum_by_type(this_month.iter().copied(), TransactionType::Income),
        monthly_expense: sum_by_type(this_month.iter().copied(), TransactionType::Expense),
    }
}

/// Sums a category according to its [`CategoryPolicy`].
///
/// Categories without a policy of their own are netted like cost categories.
#[must_use]
pub fn category_total(transactions: &[Transaction], category: Category) -> f64 {
    let policy = category.summary_policy().unwrap_or(CategoryPolicy::Net);
    transactions
        .iter()
        .filter(|t| t.category == category)
        .filter(|t| match policy {
            CategoryPolicy::Net => true,
            CategoryPolicy::RevenueOnly => t.kind == TransactionType::Income,
        })
        .map(|t| t.amount)
        .sum()
}

/// Sums one transaction type within one category, e.g. stock expenses.
#[must_use]
pub fn category_type_total(
    transactions: &[Transaction],
    category: Category,
    kind: TransactionType,
) -> f64 {
    transactions
        .iter()
        .filter(|t| t.category == category && t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

fn sum_by_type<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    kind: TransactionType,
) -> f64 {
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

fn same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// Income and expense figures for one calendar month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

impl MonthStats {
    #[must_use]
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Collects the statistics of a single month. `month` is 1-based.
#[must_use]
pub fn month_stats(transactions: &[Transaction], year: i32, month: u32) -> MonthStats {
    transactions_in_month(transactions, year, month)
        .into_iter()
        .fold(
            MonthStats {
                year,
                month,
                ..MonthStats::default()
            },
            |mut stats, t| {
                match t.kind {
                    TransactionType::Income => stats.income += t.amount,
                    TransactionType::Expense => stats.expense += t.amount,
                }
                stats.count += 1;
                stats
            },
        )
}

/// The twelve month cells of a year, January first.
#[must_use]
pub fn year_overview(transactions: &[Transaction], year: i32) -> Vec<MonthStats> {
    (1..=12)
        .map(|month| month_stats(transactions, year, month))
        .collect()
}

/// Transactions dated in the given month, in their original order.
#[must_use]
pub fn transactions_in_month(
    transactions: &[Transaction],
    year: i32,
    month: u32,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.date.year() == year && t.date.month() == month)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::ProjectStatus;
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(
        id: i64,
        kind: TransactionType,
        category: Category,
        amount: f64,
        on: NaiveDate,
    ) -> Transaction {
        Transaction {
            id,
            kind,
            category,
            amount,
            description: String::new(),
            date: on,
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        }
    }

    fn component(quantity: i32, unit_price: f64) -> Component {
        Component {
            id: 1,
            name: "Part".to_string(),
            quantity,
            unit_price,
            min_stock: 0,
            category: "General".to_string(),
        }
    }

    fn project(total_cost: f64, total_income: f64) -> Project {
        Project {
            id: 1,
            name: "Project".to_string(),
            description: String::new(),
            total_cost,
            total_income,
            hours_spent: 0.0,
            status: ProjectStatus::Active,
            start_date: date(2024, 10, 1),
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        use Category::*;
        use TransactionType::*;
        vec![
            tx(1, Expense, Rent, 2500.0, date(2024, 12, 1)),
            tx(2, Expense, Salary, 8000.0, date(2024, 12, 1)),
            tx(3, Expense, Marketing, 1500.0, date(2024, 12, 5)),
            tx(4, Income, Courses, 4500.0, date(2024, 12, 3)),
            tx(5, Income, ThreeDPrinting, 800.0, date(2024, 12, 7)),
            tx(6, Income, School, 3200.0, date(2024, 12, 10)),
            tx(7, Expense, Stock, 650.0, date(2024, 12, 8)),
            tx(8, Income, Projects, 2000.0, date(2024, 12, 12)),
            tx(9, Expense, Utilities, 300.0, date(2024, 11, 20)),
            tx(10, Income, Transfer, 1000.0, date(2024, 11, 2)),
        ]
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = aggregate(&[], &[], &[], date(2024, 12, 15));
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn test_sample_summary() {
        let transactions = sample_transactions();
        let components = vec![component(25, 22.0), component(15, 12.0)];
        let projects = vec![project(450.0, 1200.0), project(800.0, 0.0)];

        let summary = aggregate(&transactions, &components, &projects, date(2024, 12, 15));

        assert_eq!(summary.total_income, 11_500.0);
        assert_eq!(summary.total_expense, 12_950.0);
        assert_eq!(summary.profit, -1_450.0);
        assert_eq!(summary.rent_total, 2500.0);
        assert_eq!(summary.salary_total, 8000.0);
        assert_eq!(summary.marketing_total, 1500.0);
        assert_eq!(summary.utilities_total, 300.0);
        assert_eq!(summary.transfer_total, 1000.0);
        assert_eq!(summary.courses_revenue, 4500.0);
        assert_eq!(summary.print_jobs_revenue, 800.0);
        assert_eq!(summary.school_revenue, 3200.0);
        assert_eq!(summary.stock_value, 730.0);
        assert_eq!(summary.projects_profit, -50.0);
        assert_eq!(summary.monthly_income, 10_500.0);
        assert_eq!(summary.monthly_expense, 12_650.0);
        assert_eq!(summary.monthly_profit(), -2_150.0);
    }

    #[test]
    fn test_profit_identity_holds() {
        let transactions = sample_transactions();
        for n in 0..=transactions.len() {
            let summary = aggregate(&transactions[..n], &[], &[], date(2024, 12, 15));
            assert_eq!(summary.total_income - summary.total_expense, summary.profit);
        }
    }

    #[test]
    fn test_category_totals_never_exceed_full_totals() {
        let transactions = sample_transactions();
        let summary = aggregate(&transactions, &[], &[], date(2024, 12, 15));

        for category in Category::ALL {
            let income = category_type_total(&transactions, category, TransactionType::Income);
            let expense = category_type_total(&transactions, category, TransactionType::Expense);
            assert!(income <= summary.total_income);
            assert!(expense <= summary.total_expense);
        }

        let revenue_fields =
            summary.courses_revenue + summary.print_jobs_revenue + summary.school_revenue;
        assert!(revenue_fields <= summary.total_income);
    }

    #[test]
    fn test_aggregate_is_idempotent_and_order_independent() {
        let transactions = sample_transactions();
        let components = vec![component(25, 22.0)];
        let today = date(2024, 12, 15);

        let first = aggregate(&transactions, &components, &[], today);
        let second = aggregate(&transactions, &components, &[], today);
        assert_eq!(first, second);

        let mut reversed = transactions.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed, &components, &[], today), first);
        assert_eq!(transactions, sample_transactions());
    }

    #[test]
    fn test_stock_value_of_sample_components() {
        let components = vec![component(25, 22.0), component(15, 12.0)];
        let summary = aggregate(&[], &components, &[], date(2024, 12, 15));
        assert_eq!(summary.stock_value, 25.0 * 22.0 + 15.0 * 12.0);
        assert_eq!(summary.stock_value, 730.0);
    }

    #[test]
    fn test_net_and_revenue_only_categories_differ() {
        use TransactionType::*;
        let today = date(2024, 12, 15);

        let rent_rows = vec![
            tx(1, Income, Category::Rent, 100.0, today),
            tx(2, Expense, Category::Rent, 400.0, today),
        ];
        let course_rows = vec![
            tx(3, Income, Category::Courses, 100.0, today),
            tx(4, Expense, Category::Courses, 400.0, today),
        ];

        let rent_summary = aggregate(&rent_rows, &[], &[], today);
        let course_summary = aggregate(&course_rows, &[], &[], today);

        // Net categories add both types, revenue-only categories drop expenses.
        assert_eq!(rent_summary.rent_total, 500.0);
        assert_eq!(course_summary.courses_revenue, 100.0);
        assert_ne!(rent_summary.rent_total, course_summary.courses_revenue);
    }

    #[test]
    fn test_non_conforming_rows_are_taken_as_given() {
        use TransactionType::*;
        let today = date(2024, 12, 15);
        let rows = vec![
            tx(1, Income, Category::General, 0.0, today),
            tx(2, Expense, Category::General, -50.0, today),
        ];
        let summary = aggregate(&rows, &[], &[], today);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expense, -50.0);
        assert_eq!(summary.profit, 50.0);
    }

    #[test]
    fn test_monthly_fields_respect_year() {
        use TransactionType::*;
        let rows = vec![
            tx(1, Income, Category::Courses, 100.0, date(2024, 12, 1)),
            tx(2, Income, Category::Courses, 200.0, date(2023, 12, 1)),
        ];
        let summary = aggregate(&rows, &[], &[], date(2024, 12, 31));
        assert_eq!(summary.monthly_income, 100.0);
        assert_eq!(summary.total_income, 300.0);
    }

    #[test]
    fn test_month_stats_and_year_overview() {
        let transactions = sample_transactions();

        let december = month_stats(&transactions, 2024, 12);
        assert_eq!(december.count, 8);
        assert_eq!(december.income, 10_500.0);
        assert_eq!(december.expense, 12_650.0);
        assert_eq!(december.net(), -2_150.0);

        let overview = year_overview(&transactions, 2024);
        assert_eq!(overview.len(), 12);
        assert_eq!(overview[10].month, 11);
        assert_eq!(overview[10].count, 2);
        assert_eq!(overview[0].count, 0);

        assert_eq!(transactions_in_month(&transactions, 2024, 11).len(), 2);
    }
}
