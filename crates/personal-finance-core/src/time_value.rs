use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::types::{Money, Rate};
use crate::PersonalFinanceResult;

/// When during the period each payment falls due.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    /// Payment at the end of each period (the usual loan convention).
    #[default]
    PeriodEnd,
    /// Payment at the start of each period (annuity-due).
    PeriodStart,
}

/// Fixed periodic payment that amortizes `loan` down to `residual` over
/// `periods` periods at the per-period rate `rate`.
///
/// With a zero rate the payment is a straight division by the period
/// count; otherwise the annuity formula
/// `r·L·((1+r)^n + residual) / ((1+r)^n - 1)` applies. Annuity-due
/// timing divides the result by `1 + r`.
pub fn payment(
    rate: Rate,
    periods: u32,
    loan: Money,
    residual: Money,
    timing: PaymentTiming,
) -> PersonalFinanceResult<Money> {
    if periods == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok((loan + residual) / Decimal::from(periods));
    }

    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r.powd(Decimal::from(periods));
    let annuity_factor = factor - Decimal::ONE;

    if annuity_factor.is_zero() {
        return Err(PersonalFinanceError::DivisionByZero {
            context: "payment annuity factor".into(),
        });
    }

    let mut pmt = rate * loan * (factor + residual) / annuity_factor;

    if timing == PaymentTiming::PeriodStart {
        pmt /= one_plus_r;
    }

    Ok(pmt)
}
