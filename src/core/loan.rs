//! Loan business logic.
//!
//! EMI (equated monthly installment) computation and the figures shown for a
//! loan portfolio. All functions here are pure; recording a payment against
//! the store happens in [`crate::state::AppState::pay_emi`].

use crate::{
    errors::{Error, Result},
    models::{Loan, LoanPatch, LoanStatus, NewLoan},
};
use serde::Serialize;

/// Fixed monthly installment for an amortizing loan.
///
/// `annual_rate_percent` is the yearly rate in percent. With a zero rate the
/// principal is split evenly (unrounded); otherwise the standard annuity
/// formula is used and rounded to the nearest whole currency unit.
///
/// `term_months` must be at least 1. Validating that is the caller's job;
/// [`NewLoan`] does so before a loan is stored.
#[must_use]
pub fn emi(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let r = annual_rate_percent / 100.0 / 12.0;
    let n = f64::from(term_months);

    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    (principal * r * growth / (growth - 1.0)).round()
}

/// Installment amount for a new loan: the explicit one, or [`emi`] of its terms.
#[must_use]
pub fn installment_for(loan: &NewLoan) -> f64 {
    loan.emi_amount.unwrap_or_else(|| {
        emi(
            loan.principal_amount,
            loan.interest_rate,
            u32::try_from(loan.total_emi_count).unwrap_or(1).max(1),
        )
    })
}

/// Per-loan figures derived from its installment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanFigures {
    pub remaining_amount: f64,
    pub total_payable: f64,
    pub interest: f64,
    /// Share of installments paid, 0-100
    pub progress_percent: f64,
}

#[must_use]
pub fn loan_figures(loan: &Loan) -> LoanFigures {
    let remaining = f64::from(loan.total_emi_count - loan.paid_emi_count);
    let total_payable = f64::from(loan.total_emi_count) * loan.emi_amount;
    let progress_percent = if loan.total_emi_count == 0 {
        0.0
    } else {
        f64::from(loan.paid_emi_count) / f64::from(loan.total_emi_count) * 100.0
    };

    LoanFigures {
        remaining_amount: remaining * loan.emi_amount,
        total_payable,
        interest: total_payable - loan.principal_amount,
        progress_percent,
    }
}

/// Totals across every loan of the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPortfolio {
    /// Sum of the outstanding installments of all loans
    pub total_debt: f64,
    pub total_principal: f64,
    /// Installments due each month on active loans
    pub monthly_emi: f64,
    pub active_loans: usize,
}

#[must_use]
pub fn portfolio(loans: &[Loan]) -> LoanPortfolio {
    loans.iter().fold(LoanPortfolio::default(), |mut acc, loan| {
        acc.total_debt += loan_figures(loan).remaining_amount;
        acc.total_principal += loan.principal_amount;
        if loan.status == LoanStatus::Active {
            acc.monthly_emi += loan.emi_amount;
            acc.active_loans += 1;
        }
        acc
    })
}

/// Works out the patch that records one more paid installment.
///
/// The loan is marked completed once the last installment is paid.
///
/// # Errors
/// Returns [`Error::LoanCompleted`] when every installment is already paid.
pub fn next_payment(loan: &Loan) -> Result<LoanPatch> {
    if loan.paid_emi_count >= loan.total_emi_count {
        return Err(Error::LoanCompleted { id: loan.id });
    }

    let paid = loan.paid_emi_count + 1;
    let status = if paid >= loan.total_emi_count {
        LoanStatus::Completed
    } else {
        LoanStatus::Active
    };

    Ok(LoanPatch {
        paid_emi_count: Some(paid),
        status: Some(status),
        ..LoanPatch::default()
    })
}
