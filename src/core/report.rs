//! Section report generation.
//!
//! Each dashboard section (payroll, courses, printing, ...) shows a handful of
//! figures computed from the collections it owns. These functions return
//! structured data; formatting is left to the presentation layer, apart from
//! [`format_taka`] which renders amounts the way the dashboard displays them.

use crate::core::{
    inventory,
    loan::LoanPortfolio,
    summary::{DashboardSummary, category_type_total},
};
use crate::models::{
    Category, Component, Employee, PaymentStatus, PrintJob, Project, ProjectStatus, Shareholder,
    Student, Transaction, TransactionType,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollReport {
    /// Sum of monthly salaries of all employees
    pub monthly_payroll: f64,
    /// Salary expenses actually booked
    pub salary_paid: f64,
    pub employee_count: usize,
}

#[must_use]
pub fn payroll_report(employees: &[Employee], transactions: &[Transaction]) -> PayrollReport {
    PayrollReport {
        monthly_payroll: employees.iter().map(|e| e.salary).sum(),
        salary_paid: category_type_total(transactions, Category::Salary, TransactionType::Expense),
        employee_count: employees.len(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursesReport {
    pub revenue: f64,
    pub student_count: usize,
    pub paid_students: usize,
    /// Students whose payment is pending or overdue
    pub pending_payments: usize,
}

#[must_use]
pub fn courses_report(students: &[Student], transactions: &[Transaction]) -> CoursesReport {
    let paid_students = students
        .iter()
        .filter(|s| s.payment_status == PaymentStatus::Paid)
        .count();

    CoursesReport {
        revenue: category_type_total(transactions, Category::Courses, TransactionType::Income),
        student_count: students.len(),
        paid_students,
        pending_payments: students.len() - paid_students,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolReport {
    pub income: f64,
    pub expense: f64,
}

impl SchoolReport {
    #[must_use]
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

#[must_use]
pub fn school_report(transactions: &[Transaction]) -> SchoolReport {
    SchoolReport {
        income: category_type_total(transactions, Category::School, TransactionType::Income),
        expense: category_type_total(transactions, Category::School, TransactionType::Expense),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintingReport {
    pub revenue: f64,
    /// Sum of job costs
    pub cost: f64,
    pub labor_hours: f64,
    pub profit: f64,
    pub job_count: usize,
}

#[must_use]
pub fn printing_report(jobs: &[PrintJob], transactions: &[Transaction]) -> PrintingReport {
    let revenue =
        category_type_total(transactions, Category::ThreeDPrinting, TransactionType::Income);
    let cost: f64 = jobs.iter().map(|j| j.total_cost).sum();

    PrintingReport {
        revenue,
        cost,
        labor_hours: jobs.iter().map(|j| j.labor_hours).sum(),
        profit: revenue - cost,
        job_count: jobs.len(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsReport {
    pub total_profit: f64,
    pub total_hours: f64,
    pub active_projects: usize,
}

#[must_use]
pub fn projects_report(projects: &[Project]) -> ProjectsReport {
    ProjectsReport {
        total_profit: projects.iter().map(Project::profit).sum(),
        total_hours: projects.iter().map(|p| p.hours_spent).sum(),
        active_projects: projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Active)
            .count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub component_count: usize,
    pub total_value: f64,
    pub low_stock_items: usize,
    pub stock_expenses: f64,
}

#[must_use]
pub fn stock_report(components: &[Component], transactions: &[Transaction]) -> StockReport {
    StockReport {
        component_count: components.len(),
        total_value: inventory::stock_value(components),
        low_stock_items: inventory::low_stock_count(components),
        stock_expenses: category_type_total(
            transactions,
            Category::Stock,
            TransactionType::Expense,
        ),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareholdersReport {
    pub shareholder_count: usize,
    pub total_investment: f64,
    /// Sum of ownership percentages handed out so far
    pub allocated_ownership: f64,
}

#[must_use]
pub fn shareholders_report(shareholders: &[Shareholder]) -> ShareholdersReport {
    ShareholdersReport {
        shareholder_count: shareholders.len(),
        total_investment: shareholders.iter().map(|s| s.total_invested).sum(),
        allocated_ownership: shareholders.iter().map(|s| s.ownership_percentage).sum(),
    }
}

/// All section figures at once, as shown across the dashboard pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionReports {
    pub payroll: PayrollReport,
    pub courses: CoursesReport,
    pub school: SchoolReport,
    pub printing: PrintingReport,
    pub projects: ProjectsReport,
    pub stock: StockReport,
    pub shareholders: ShareholdersReport,
    pub loans: LoanPortfolio,
}

/// Formats an amount in Bangladeshi Taka with lakh/crore digit grouping.
///
/// Fractions are rounded to two places and dropped when zero, e.g.
/// `1234567.5` becomes `"৳12,34,567.50"` and `-2500.0` becomes `"-৳2,500"`.
#[must_use]
pub fn format_taka(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round();

    // Cast safety: realistic business amounts are far below 2^53 cents.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let grouped = group_lakh(&whole.to_string());
    if fraction == 0 {
        format!("{sign}৳{grouped}")
    } else {
        format!("{sign}৳{grouped}.{fraction:02}")
    }
}

/// Inserts separators after the last three digits and then every two.
fn group_lakh(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// One-line textual digest of a summary, used for logging.
#[must_use]
pub fn format_summary_line(summary: &DashboardSummary) -> String {
    format!(
        "income {} | expense {} | profit {} | this month {} / {}",
        format_taka(summary.total_income),
        format_taka(summary.total_expense),
        format_taka(summary.profit),
        format_taka(summary.monthly_income),
        format_taka(summary.monthly_expense),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn tx(kind: TransactionType, category: Category, amount: f64) -> Transaction {
        Transaction {
            id: 1,
            kind,
            category,
            amount,
            description: String::new(),
            date: date(),
            created_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        }
    }

    fn student(status: PaymentStatus) -> Student {
        Student {
            id: 1,
            name: "Alex Chen".to_string(),
            email: None,
            course: "Robotics Fundamentals".to_string(),
            batch_id: Some("B001".to_string()),
            enrollment_date: date(),
            payment_status: status,
        }
    }

    #[test]
    fn test_format_taka_grouping() {
        assert_eq!(format_taka(0.0), "৳0");
        assert_eq!(format_taka(950.0), "৳950");
        assert_eq!(format_taka(2500.0), "৳2,500");
        assert_eq!(format_taka(123_456.0), "৳1,23,456");
        assert_eq!(format_taka(1_234_567.5), "৳12,34,567.50");
        assert_eq!(format_taka(-2500.0), "-৳2,500");
    }

    #[test]
    fn test_payroll_report() {
        let employees = vec![
            Employee {
                id: 1,
                name: "John Smith".to_string(),
                position: "Lead Developer".to_string(),
                salary: 5000.0,
                start_date: date(),
            },
            Employee {
                id: 2,
                name: "Sarah Johnson".to_string(),
                position: "Instructor".to_string(),
                salary: 3000.0,
                start_date: date(),
            },
        ];
        let transactions = vec![
            tx(TransactionType::Expense, Category::Salary, 8000.0),
            tx(TransactionType::Income, Category::Salary, 100.0),
        ];
        let report = payroll_report(&employees, &transactions);
        assert_eq!(report.monthly_payroll, 8000.0);
        assert_eq!(report.salary_paid, 8000.0);
        assert_eq!(report.employee_count, 2);
    }

    #[test]
    fn test_courses_report_counts_unpaid_as_pending() {
        let students = vec![
            student(PaymentStatus::Paid),
            student(PaymentStatus::Pending),
            student(PaymentStatus::Overdue),
        ];
        let transactions = vec![
            tx(TransactionType::Income, Category::Courses, 4500.0),
            tx(TransactionType::Expense, Category::Courses, 500.0),
        ];
        let report = courses_report(&students, &transactions);
        assert_eq!(report.revenue, 4500.0);
        assert_eq!(report.paid_students, 1);
        assert_eq!(report.pending_payments, 2);
    }

    #[test]
    fn test_school_report() {
        let transactions = vec![
            tx(TransactionType::Income, Category::School, 3200.0),
            tx(TransactionType::Expense, Category::School, 700.0),
        ];
        let report = school_report(&transactions);
        assert_eq!(report.net(), 2500.0);
    }

    #[test]
    fn test_printing_report() {
        let jobs = vec![PrintJob {
            id: 1,
            name: "Custom Enclosure".to_string(),
            filament_used: 150.0,
            filament_cost: 4.5,
            labor_hours: 2.0,
            hourly_rate: 25.0,
            electricity_cost: 1.5,
            total_cost: 56.0,
            date: date(),
        }];
        let transactions = vec![tx(TransactionType::Income, Category::ThreeDPrinting, 800.0)];
        let report = printing_report(&jobs, &transactions);
        assert_eq!(report.revenue, 800.0);
        assert_eq!(report.cost, 56.0);
        assert_eq!(report.profit, 744.0);
        assert_eq!(report.labor_hours, 2.0);
    }

    #[test]
    fn test_projects_and_shareholders_reports() {
        let projects = vec![
            Project {
                id: 1,
                name: "Home Automation System".to_string(),
                description: String::new(),
                total_cost: 450.0,
                total_income: 1200.0,
                hours_spent: 40.0,
                status: ProjectStatus::Completed,
                start_date: date(),
            },
            Project {
                id: 2,
                name: "Industrial Monitoring".to_string(),
                description: String::new(),
                total_cost: 800.0,
                total_income: 0.0,
                hours_spent: 25.0,
                status: ProjectStatus::Active,
                start_date: date(),
            },
        ];
        let report = projects_report(&projects);
        assert_eq!(report.total_profit, -50.0);
        assert_eq!(report.total_hours, 65.0);
        assert_eq!(report.active_projects, 1);

        let shareholders = vec![Shareholder {
            id: 1,
            name: "Founder".to_string(),
            designation: "CEO".to_string(),
            ownership_percentage: 40.0,
            total_invested: 50_000.0,
            email: None,
            phone: None,
            photo_url: None,
        }];
        let report = shareholders_report(&shareholders);
        assert_eq!(report.total_investment, 50_000.0);
        assert_eq!(report.allocated_ownership, 40.0);
    }

    #[test]
    fn test_stock_report() {
        let components = vec![Component {
            id: 1,
            name: "Ultrasonic Sensor".to_string(),
            quantity: 8,
            unit_price: 3.0,
            min_stock: 15,
            category: "Sensors".to_string(),
        }];
        let transactions = vec![tx(TransactionType::Expense, Category::Stock, 650.0)];
        let report = stock_report(&components, &transactions);
        assert_eq!(report.total_value, 24.0);
        assert_eq!(report.low_stock_items, 1);
        assert_eq!(report.stock_expenses, 650.0);
    }
}
