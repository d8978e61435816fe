//! Entity module - Contains all SeaORM entity definitions for the database.
//! Each table is scoped by an `account_id` column and uses snake_case column
//! names; the domain records in [`crate::models`] are mapped from these models.

pub mod component;
pub mod employee;
pub mod loan;
pub mod print_job;
pub mod project;
pub mod shareholder;
pub mod shareholder_investment;
pub mod student;
pub mod transaction;

// Re-export specific types to avoid conflicts
pub use component::{Column as ComponentColumn, Entity as Component, Model as ComponentModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use loan::{Column as LoanColumn, Entity as Loan, Model as LoanModel};
pub use print_job::{Column as PrintJobColumn, Entity as PrintJob, Model as PrintJobModel};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use shareholder::{
    Column as ShareholderColumn, Entity as Shareholder, Model as ShareholderModel,
};
pub use shareholder_investment::{
    Column as ShareholderInvestmentColumn, Entity as ShareholderInvestment,
    Model as ShareholderInvestmentModel,
};
pub use student::{Column as StudentColumn, Entity as Student, Model as StudentModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
