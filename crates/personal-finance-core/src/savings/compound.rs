//! Compound-growth projections.
//!
//! Two flavours: a contribution plan quoted per month with an annual rate
//! and a monthly/annual compounding switch, and a recurring-deposit plan
//! with an opening balance where both the deposit and the rate are quoted
//! per period. In both, each period deposits first and then grows the
//! running total by the period rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PersonalFinanceResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// How often interest is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// Twelve periods per year; the monthly contribution and one twelfth
    /// of the annual rate apply each period.
    Monthly,
    /// One period per year; a full year of contributions and the whole
    /// annual rate apply each period.
    Annual,
}

/// Input for a contribution growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionRequest {
    /// Amount set aside each month.
    pub monthly_contribution: Money,
    /// Annual interest rate as a decimal fraction (0.073 means 7.3%).
    pub annual_rate: Rate,
    /// Projection horizon in years.
    pub years: u32,
    pub compounding: Compounding,
}

/// Output of a contribution growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Value of the plan at the end of the horizon.
    pub total_value: Money,
    /// Sum of contributions, excluding interest.
    pub total_invested: Money,
    /// total_value - total_invested.
    pub growth: Money,
}

/// Input for a recurring-deposit projection with an opening balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDepositRequest {
    /// Balance already in the account.
    pub opening_balance: Money,
    /// Deposit made each period.
    pub deposit: Money,
    /// Interest rate per period as a decimal fraction.
    pub period_rate: Rate,
    /// Number of periods to project.
    pub periods: u32,
}

/// Output of a recurring-deposit projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDepositResult {
    pub total_value: Money,
    /// Sum of deposits, excluding the opening balance and interest.
    pub total_deposited: Money,
    /// total_value - opening balance - deposits.
    pub growth: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the growth of a monthly contribution plan.
pub fn project_contributions(
    request: &ContributionRequest,
) -> PersonalFinanceResult<ComputationOutput<ContributionResult>> {
    let start = Instant::now();

    validate_contribution_request(request)?;

    let (periods, contribution, period_rate) = match request.compounding {
        Compounding::Monthly => (
            request.years * MONTHS_PER_YEAR,
            request.monthly_contribution,
            request.annual_rate / Decimal::from(MONTHS_PER_YEAR),
        ),
        Compounding::Annual => (
            request.years,
            request.monthly_contribution * Decimal::from(MONTHS_PER_YEAR),
            request.annual_rate,
        ),
    };

    let growth_factor = Decimal::ONE + period_rate;
    let mut total_value = Decimal::ZERO;
    let mut total_invested = Decimal::ZERO;

    for _ in 0..periods {
        total_value += contribution;
        total_value *= growth_factor;
        total_invested += contribution;
    }

    let result = ContributionResult {
        total_value,
        total_invested,
        growth: total_value - total_invested,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound Growth — periodic contributions, deposit then grow",
        &serde_json::json!({
            "monthly_contribution": request.monthly_contribution.to_string(),
            "annual_rate": request.annual_rate.to_string(),
            "years": request.years,
            "compounding": request.compounding,
        }),
        Vec::new(),
        elapsed,
        result,
    ))
}

/// Project a recurring-deposit account from an opening balance.
pub fn project_recurring_deposit(
    request: &RecurringDepositRequest,
) -> PersonalFinanceResult<ComputationOutput<RecurringDepositResult>> {
    let start = Instant::now();

    validate_recurring_deposit_request(request)?;

    let growth_factor = Decimal::ONE + request.period_rate;
    let mut total_value = request.opening_balance;
    let mut total_deposited = Decimal::ZERO;

    for _ in 0..request.periods {
        total_value += request.deposit;
        total_value *= growth_factor;
        total_deposited += request.deposit;
    }

    let result = RecurringDepositResult {
        total_value,
        total_deposited,
        growth: total_value - request.opening_balance - total_deposited,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Recurring Deposit Growth — opening balance plus per-period deposits",
        &serde_json::json!({
            "opening_balance": request.opening_balance.to_string(),
            "deposit": request.deposit.to_string(),
            "period_rate": request.period_rate.to_string(),
            "periods": request.periods,
        }),
        Vec::new(),
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_contribution_request(request: &ContributionRequest) -> PersonalFinanceResult<()> {
    if request.monthly_contribution < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "Contribution cannot be negative".into(),
        });
    }
    if request.annual_rate < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if request.years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "years".into(),
            reason: "Projection horizon must be at least 1 year".into(),
        });
    }
    Ok(())
}

fn validate_recurring_deposit_request(
    request: &RecurringDepositRequest,
) -> PersonalFinanceResult<()> {
    if request.opening_balance < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "opening_balance".into(),
            reason: "Opening balance cannot be negative".into(),
        });
    }
    if request.deposit < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "deposit".into(),
            reason: "Deposit cannot be negative".into(),
        });
    }
    if request.period_rate < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "period_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if request.periods == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
