//! `loan_amortization` is a Rust library for calculating fixed-rate,
//! equal-installment loan amortization.
//!
//! Given a principal, an annual percentage rate, and a term in months, it
//! computes the fixed monthly payment (French amortization / Price table),
//! the total interest and total repayment amount, and a period-by-period
//! schedule showing how each payment splits between principal and interest.
//!
//! All arithmetic uses `rust_decimal::Decimal`. Values are returned at full
//! precision; rounding to currency units is left to the caller at
//! presentation time.
//!
//! ## Usage
//!
//! Add `loan_amortization` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! loan_amortization = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use the `calculate` function to get the payment, totals, and
//! schedule for a loan:
//!
//! ```rust
//! use loan_amortization::{calculate, LoanTerms};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let terms = LoanTerms {
//!         principal: dec!(100_000),
//!         annual_rate_percent: dec!(12),
//!         term_months: 12,
//!     };
//!
//!     match calculate(terms) {
//!         Ok(result) => {
//!             println!("Monthly payment: {:.2}", result.monthly_payment);
//!             println!("Total interest:  {:.2}", result.total_interest);
//!             println!("Total amount:    {:.2}", result.total_amount);
//!             println!("Periods:         {}", result.schedule.len());
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating amortization: {}", e);
//!         }
//!     }
//! }
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input parameters for an amortization calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// The total principal amount of the loan. Must be positive.
    pub principal: Decimal,
    /// The annual interest rate as a percentage (e.g., 12 for 12%).
    /// Must not be negative; zero means an interest-free loan.
    pub annual_rate_percent: Decimal,
    /// The total number of monthly installments. Must be at least one.
    pub term_months: u32,
}

/// Represents one installment of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// The 1-based index of the installment.
    pub period_index: u32,
    /// The total amount paid this period. Constant across the schedule.
    pub payment_amount: Decimal,
    /// The portion of the payment that reduces the principal.
    pub principal_portion: Decimal,
    /// The portion of the payment that covers interest.
    pub interest_portion: Decimal,
    /// The balance still owed after this payment, clamped at zero.
    pub remaining_balance: Decimal,
}

/// Contains the results of an amortization calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// The fixed monthly payment amount.
    pub monthly_payment: Decimal,
    /// The total interest paid over the lifetime of the loan, summed
    /// from the schedule.
    pub total_interest: Decimal,
    /// The total amount repaid: principal plus total interest.
    pub total_amount: Decimal,
    /// A vector with the payment details for each month, with exactly
    /// `term_months` entries.
    pub schedule: Vec<PaymentPeriod>,
}

/// A flattened snapshot of one calculation, for callers that persist
/// results to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_amount: Decimal,
}

impl CalculationRecord {
    /// Flattens the terms and the computed totals into a storable record.
    pub fn new(terms: &LoanTerms, result: &AmortizationResult) -> Self {
        CalculationRecord {
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            term_months: terms.term_months,
            monthly_payment: result.monthly_payment,
            total_interest: result.total_interest,
            total_amount: result.total_amount,
        }
    }
}

/// Error returned when loan terms fail validation, naming the offending
/// field. Raised before any computation begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {field} {reason}")]
pub struct InvalidInputError {
    /// The name of the field that failed validation.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: &'static str,
}

/// Converts an annual percentage rate to a monthly decimal rate.
///
/// Uses the nominal convention: the annual percentage is divided by 100 and
/// by 12. A 12% annual rate becomes a monthly rate of 0.01.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

fn validate(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<(), InvalidInputError> {
    if principal <= dec!(0) {
        return Err(InvalidInputError {
            field: "principal",
            reason: "must be greater than zero",
        });
    }
    if annual_rate_percent < dec!(0) {
        return Err(InvalidInputError {
            field: "annual_rate_percent",
            reason: "must not be negative",
        });
    }
    if term_months < 1 {
        return Err(InvalidInputError {
            field: "term_months",
            reason: "must be at least one",
        });
    }
    Ok(())
}

/// Computes the fixed monthly payment for a fixed-rate loan.
///
/// The payment formula is: PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1]
///
/// An interest-free loan splits the principal evenly across the term; the
/// annuity formula divides by zero at a zero rate and is never evaluated
/// in that case.
///
/// # Arguments
///
/// * `principal` - The principal loan amount.
/// * `annual_rate_percent` - The annual interest rate as a percentage.
/// * `term_months` - The total number of monthly installments.
///
/// # Errors
///
/// Returns an `InvalidInputError` if `principal` is not positive,
/// `annual_rate_percent` is negative, or `term_months` is zero.
pub fn compute_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, InvalidInputError> {
    validate(principal, annual_rate_percent, term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(principal / Decimal::from(term_months));
    }

    let i_plus_1_pow_n = (dec!(1) + rate).powu(term_months.into());
    Ok(principal * (rate * i_plus_1_pow_n) / (i_plus_1_pow_n - dec!(1)))
}

/// Builds the period-by-period amortization schedule for a fixed payment.
///
/// Starting from a balance equal to the principal, each period charges
/// interest on the running balance, applies the remainder of the payment to
/// principal, and carries the new balance forward. The balance is clamped at
/// zero so the final period cannot go negative from accumulated rounding.
///
/// The payment is constant across periods and is never re-derived; only the
/// principal/interest split shifts as the balance amortizes.
///
/// # Arguments
///
/// * `principal` - The principal loan amount.
/// * `annual_rate_percent` - The annual interest rate as a percentage.
/// * `term_months` - The total number of monthly installments.
/// * `monthly_payment` - The fixed payment from [`compute_monthly_payment`].
pub fn build_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
    monthly_payment: Decimal,
) -> Vec<PaymentPeriod> {
    let rate = monthly_rate(annual_rate_percent);
    let mut remaining_balance = principal;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for period_index in 1..=term_months {
        let interest_portion = remaining_balance * rate;
        let principal_portion = monthly_payment - interest_portion;
        remaining_balance = (remaining_balance - principal_portion).max(dec!(0));
        schedule.push(PaymentPeriod {
            period_index,
            payment_amount: monthly_payment,
            principal_portion,
            interest_portion,
            remaining_balance,
        });
    }

    schedule
}

/// Calculates the full amortization result for the given loan terms.
///
/// This is the main entry point of the library. It validates the terms,
/// computes the fixed monthly payment, builds the schedule, and derives the
/// totals by summing the realized schedule, so `total_interest` and
/// `total_amount` are always consistent with the periods they summarize.
///
/// The calculation is pure: the same terms always produce the same result.
///
/// # Arguments
///
/// * `terms` - A `LoanTerms` struct with the loan amount, rate, and term.
///
/// # Errors
///
/// Returns an `InvalidInputError` naming the failing field if the terms are
/// out of range. Once the terms validate, the computation cannot fail.
pub fn calculate(terms: LoanTerms) -> Result<AmortizationResult, InvalidInputError> {
    let monthly_payment =
        compute_monthly_payment(terms.principal, terms.annual_rate_percent, terms.term_months)?;

    let schedule = build_schedule(
        terms.principal,
        terms.annual_rate_percent,
        terms.term_months,
        monthly_payment,
    );

    let total_interest: Decimal = schedule.iter().map(|p| p.interest_portion).sum();
    let total_amount = terms.principal + total_interest;

    Ok(AmortizationResult {
        monthly_payment,
        total_interest,
        total_amount,
        schedule,
    })
}
