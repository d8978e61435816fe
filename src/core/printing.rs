//! 3D-print job costing.
//!
//! A job is priced from its filament, labor and electricity. Adding a job also
//! books its cost as an expense, see [`expense_for`].

use crate::models::{Category, NewPrintJob, NewTransaction, TransactionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw job parameters as entered on the printing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJobInput {
    pub name: String,
    /// Grams of filament
    pub filament_used: f64,
    pub filament_cost_per_gram: f64,
    pub labor_hours: f64,
    pub hourly_rate: f64,
    #[serde(default)]
    pub electricity_cost: f64,
}

/// Prices a job: filament used × cost per gram, plus labor hours × rate,
/// plus electricity.
#[must_use]
pub fn price_job(input: &PrintJobInput, date: NaiveDate) -> NewPrintJob {
    let filament_cost = input.filament_used * input.filament_cost_per_gram;
    let labor_cost = input.labor_hours * input.hourly_rate;

    NewPrintJob {
        name: input.name.trim().to_string(),
        filament_used: input.filament_used,
        filament_cost,
        labor_hours: input.labor_hours,
        hourly_rate: input.hourly_rate,
        electricity_cost: input.electricity_cost,
        total_cost: filament_cost + labor_cost + input.electricity_cost,
        date,
    }
}

/// The expense transaction booked alongside a new print job, or `None` for a
/// job that cost nothing.
#[must_use]
pub fn expense_for(job: &NewPrintJob) -> Option<NewTransaction> {
    (job.total_cost > 0.0).then(|| NewTransaction {
        kind: TransactionType::Expense,
        category: Category::ThreeDPrinting,
        amount: job.total_cost,
        description: format!("3D Print Job: {}", job.name),
        date: job.date,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn input() -> PrintJobInput {
        PrintJobInput {
            name: "Robot Arm Parts".to_string(),
            filament_used: 300.0,
            filament_cost_per_gram: 0.03,
            labor_hours: 5.0,
            hourly_rate: 25.0,
            electricity_cost: 3.0,
        }
    }

    #[test]
    fn test_price_job() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 8).unwrap();
        let job = price_job(&input(), date);
        assert!((job.filament_cost - 9.0).abs() < 1e-9);
        assert!((job.total_cost - 137.0).abs() < 1e-9);
        assert_eq!(job.date, date);
    }

    #[test]
    fn test_expense_mirrors_job_cost() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 8).unwrap();
        let job = price_job(&input(), date);
        let expense = expense_for(&job).unwrap();

        assert_eq!(expense.kind, TransactionType::Expense);
        assert_eq!(expense.category, Category::ThreeDPrinting);
        assert_eq!(expense.amount, job.total_cost);
        assert_eq!(expense.description, "3D Print Job: Robot Arm Parts");
        assert_eq!(expense.date, date);
    }

    #[test]
    fn test_free_job_books_no_expense() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 8).unwrap();
        let free = PrintJobInput {
            filament_cost_per_gram: 0.0,
            hourly_rate: 0.0,
            electricity_cost: 0.0,
            ..input()
        };
        let job = price_job(&free, date);

        assert_eq!(job.total_cost, 0.0);
        assert!(expense_for(&job).is_none());
    }
}
