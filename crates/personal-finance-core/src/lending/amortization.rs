//! Month-by-month loan amortization.
//!
//! The monthly payment comes from the standard annuity formula; the
//! simulation then walks the loan one month at a time, applying an
//! optional flat additional payment every month and scheduled extra
//! principal payments under a value/limit/frequency policy, until the
//! balance reaches zero or the period runs out.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::time_value::{payment, PaymentTiming};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);
/// Residuals below one cent after the final month are decimal rounding,
/// not an actual shortfall.
const REPAYMENT_TOLERANCE: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Scheduled extra principal payments on top of the regular payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentPolicy {
    /// Amount of each extra payment. Zero disables the policy.
    pub value: Money,
    /// Maximum number of extra payments. Zero means unlimited.
    pub limit: u32,
    /// Month interval at which extra payments fall due, counted from the
    /// first month (a frequency of 1 pays extra every month).
    pub frequency: u32,
}

impl Default for ExtraPaymentPolicy {
    fn default() -> Self {
        ExtraPaymentPolicy {
            value: Decimal::ZERO,
            limit: 0,
            frequency: 1,
        }
    }
}

/// Input for a loan amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed.
    pub principal: Money,
    /// One-time costs added to the total paid but not amortized.
    pub additional_costs: Money,
    /// Annual interest rate as a percentage (5.36 means 5.36%).
    pub annual_interest_rate: Rate,
    /// Repayment period in months.
    pub period_months: u32,
    /// Flat amount added to every monthly payment.
    pub additional_monthly_payment: Money,
    /// Scheduled extra principal payments.
    #[serde(default)]
    pub extra_payments: ExtraPaymentPolicy,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationMonth {
    pub month: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal: Money,
    pub extra_payment: Money,
    pub closing_balance: Money,
}

/// Output of a loan amortization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Annuity payment ignoring any extras.
    pub base_monthly_payment: Money,
    /// Base payment plus the flat additional payment.
    pub actual_monthly_payment: Money,
    /// Actual payment plus the extra-payment value. Informational only;
    /// the extra is not applied every month unless the frequency is 1.
    pub actual_monthly_payment_with_extra: Money,
    /// Principal + additional costs + total interest.
    pub total_paid: Money,
    pub total_interest: Money,
    /// Total interest as a percentage of the principal.
    pub overpay_pct: Rate,
    /// Months actually taken to repay.
    pub duration_months: u32,
    pub extra_payments_made: u32,
    pub extra_payments_value: Money,
    /// Nominal period minus the actual duration.
    pub months_saved: u32,
    /// False when the schedule did not amortize the loan within the period.
    pub fully_repaid: bool,
    /// Balance still outstanding at the end of the period, zero when repaid.
    pub remaining_balance: Money,
    pub schedule: Vec<AmortizationMonth>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize a loan month by month, applying flat and scheduled extra
/// principal payments.
///
/// A payment schedule that fails to repay the loan within the period is
/// not an error: the result reports `fully_repaid = false` with the
/// outstanding `remaining_balance`, and the envelope carries a warning.
pub fn amortize(
    request: &LoanRequest,
) -> PersonalFinanceResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_request(request)?;

    let monthly_rate = request.annual_interest_rate / PERCENT / MONTHS_PER_YEAR;
    let base_monthly_payment = payment(
        monthly_rate,
        request.period_months,
        request.principal,
        Decimal::ZERO,
        PaymentTiming::PeriodEnd,
    )?;
    let actual_monthly_payment = base_monthly_payment + request.additional_monthly_payment;

    let first_month_interest = request.principal * monthly_rate;
    if actual_monthly_payment <= first_month_interest && first_month_interest > Decimal::ZERO {
        warnings.push(format!(
            "Monthly payment {} does not cover first-month interest {}; the balance will not amortize",
            actual_monthly_payment, first_month_interest
        ));
    }

    let policy = &request.extra_payments;
    let mut schedule: Vec<AmortizationMonth> = Vec::with_capacity(request.period_months as usize);
    let mut balance = request.principal;
    let mut total_interest = Decimal::ZERO;
    let mut extra_payments_made: u32 = 0;
    let mut extra_payments_value = Decimal::ZERO;
    let mut month: u32 = 0;

    while month < request.period_months && balance > Decimal::ZERO {
        let opening_balance = balance;
        let interest = balance * monthly_rate;
        let principal_portion = actual_monthly_payment - interest;

        // Extra payment falls due when the policy is active, the limit has
        // not been reached (0 = unlimited), and the month index divides the
        // frequency. The first month always qualifies.
        let extra = if policy.value > Decimal::ZERO
            && (policy.limit == 0 || extra_payments_made < policy.limit)
            && month % policy.frequency == 0
        {
            extra_payments_made += 1;
            extra_payments_value += policy.value;
            policy.value
        } else {
            Decimal::ZERO
        };

        balance -= principal_portion + extra;
        total_interest += interest;
        month += 1;

        schedule.push(AmortizationMonth {
            month,
            opening_balance,
            interest,
            principal: principal_portion,
            extra_payment: extra,
            closing_balance: balance,
        });
    }

    let remaining_balance = if balance > REPAYMENT_TOLERANCE {
        balance
    } else {
        Decimal::ZERO
    };
    let fully_repaid = remaining_balance.is_zero();
    if !fully_repaid {
        warnings.push(format!(
            "Loan not fully repaid within {} months — {} remains outstanding",
            request.period_months, remaining_balance
        ));
    }

    let actual_monthly_payment_with_extra = if policy.value > Decimal::ZERO {
        actual_monthly_payment + policy.value
    } else {
        actual_monthly_payment
    };

    let result = AmortizationResult {
        base_monthly_payment,
        actual_monthly_payment,
        actual_monthly_payment_with_extra,
        total_paid: request.principal + request.additional_costs + total_interest,
        total_interest,
        overpay_pct: total_interest / request.principal * PERCENT,
        duration_months: month,
        extra_payments_made,
        extra_payments_value,
        months_saved: request.period_months - month,
        fully_repaid,
        remaining_balance,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Amortization — annuity payment with flat and scheduled extra principal payments",
        &serde_json::json!({
            "principal": request.principal.to_string(),
            "annual_interest_rate_pct": request.annual_interest_rate.to_string(),
            "period_months": request.period_months,
            "additional_monthly_payment": request.additional_monthly_payment.to_string(),
            "extra_payment_value": policy.value.to_string(),
            "extra_payment_limit": policy.limit,
            "extra_payment_frequency": policy.frequency,
        }),
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_loan_request(request: &LoanRequest) -> PersonalFinanceResult<()> {
    if request.principal <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if request.additional_costs < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "additional_costs".into(),
            reason: "Additional costs cannot be negative".into(),
        });
    }
    if request.annual_interest_rate < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if request.period_months == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "period_months".into(),
            reason: "Repayment period must be at least 1 month".into(),
        });
    }
    if request.additional_monthly_payment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "additional_monthly_payment".into(),
            reason: "Additional monthly payment cannot be negative".into(),
        });
    }
    if request.extra_payments.value < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "extra_payments.value".into(),
            reason: "Extra payment value cannot be negative".into(),
        });
    }
    if request.extra_payments.frequency == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "extra_payments.frequency".into(),
            reason: "Extra payment frequency must be at least 1 month".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Helper: the worked example — 550k at 5.36% over 76 months with a
    /// 4,000 extra payment every month.
    fn example_loan() -> LoanRequest {
        LoanRequest {
            principal: dec!(550_000),
            additional_costs: dec!(500),
            annual_interest_rate: dec!(5.36),
            period_months: 76,
            additional_monthly_payment: dec!(0),
            extra_payments: ExtraPaymentPolicy {
                value: dec!(4_000),
                limit: 0,
                frequency: 1,
            },
        }
    }

    fn without_extras(mut request: LoanRequest) -> LoanRequest {
        request.extra_payments = ExtraPaymentPolicy::default();
        request
    }

    // -----------------------------------------------------------------------
    // 1. Worked example: base payment, accelerated payoff
    // -----------------------------------------------------------------------
    #[test]
    fn test_example_loan_base_payment() {
        let result = amortize(&example_loan()).unwrap();
        let out = &result.result;

        // Annuity payment for 550,000 at 5.36/100/12 over 76 months
        assert!(
            (out.base_monthly_payment - dec!(8550.54)).abs() < dec!(0.01),
            "base payment should be ~8550.54, got {}",
            out.base_monthly_payment
        );
        assert_eq!(out.actual_monthly_payment, out.base_monthly_payment);
        assert_eq!(
            out.actual_monthly_payment_with_extra,
            out.actual_monthly_payment + dec!(4_000)
        );
    }

    #[test]
    fn test_example_loan_accelerated_payoff() {
        let result = amortize(&example_loan()).unwrap();
        let out = &result.result;

        assert!(out.duration_months < 76);
        assert_eq!(out.duration_months, 49);
        assert_eq!(out.months_saved, 76 - out.duration_months);
        // Frequency 1 with no limit: an extra payment lands every month
        assert_eq!(out.extra_payments_made, out.duration_months);
        assert_eq!(
            out.extra_payments_value,
            dec!(4_000) * Decimal::from(out.extra_payments_made)
        );
        assert!(out.fully_repaid);
        assert_eq!(out.remaining_balance, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 2. Baseline without extras: runs the full period, totals reconcile
    // -----------------------------------------------------------------------
    #[test]
    fn test_baseline_full_period_and_totals() {
        let request = without_extras(example_loan());
        let result = amortize(&request).unwrap();
        let out = &result.result;

        assert_eq!(out.duration_months, 76);
        assert_eq!(out.months_saved, 0);
        assert_eq!(out.extra_payments_made, 0);
        assert_eq!(out.extra_payments_value, Decimal::ZERO);
        assert!(out.fully_repaid);
        assert!(result.warnings.is_empty());

        // total paid = principal + additional costs + interest
        assert_eq!(
            out.total_paid,
            request.principal + request.additional_costs + out.total_interest
        );
        assert!(
            (out.total_interest - dec!(99840.67)).abs() < dec!(1),
            "total interest should be ~99,840.67, got {}",
            out.total_interest
        );
    }

    // -----------------------------------------------------------------------
    // 3. Extras strictly reduce interest and duration vs. the baseline
    // -----------------------------------------------------------------------
    #[test]
    fn test_extras_reduce_interest_and_duration() {
        let with = amortize(&example_loan()).unwrap().result;
        let without = amortize(&without_extras(example_loan())).unwrap().result;

        assert!(with.total_interest < without.total_interest);
        assert!(with.duration_months < without.duration_months);
        assert!(with.total_paid < without.total_paid);
    }

    // -----------------------------------------------------------------------
    // 4. Flat additional monthly payment accelerates payoff
    // -----------------------------------------------------------------------
    #[test]
    fn test_flat_additional_payment_accelerates() {
        let mut request = without_extras(example_loan());
        request.additional_monthly_payment = dec!(500);

        let result = amortize(&request).unwrap();
        let out = &result.result;

        assert_eq!(
            out.actual_monthly_payment,
            out.base_monthly_payment + dec!(500)
        );
        // No variable extras: the informational payment equals the actual
        assert_eq!(out.actual_monthly_payment_with_extra, out.actual_monthly_payment);
        assert!(out.duration_months < 76);
        assert_eq!(out.months_saved, 76 - out.duration_months);
    }

    // -----------------------------------------------------------------------
    // 5. Extra payment limit and frequency
    // -----------------------------------------------------------------------
    #[test]
    fn test_extra_payment_limit() {
        let request = LoanRequest {
            principal: dec!(10_000),
            additional_costs: dec!(0),
            annual_interest_rate: dec!(6),
            period_months: 24,
            additional_monthly_payment: dec!(0),
            extra_payments: ExtraPaymentPolicy {
                value: dec!(500),
                limit: 3,
                frequency: 6,
            },
        };

        let out = amortize(&request).unwrap().result;
        assert_eq!(out.extra_payments_made, 3);
        assert_eq!(out.extra_payments_value, dec!(1_500));
    }

    #[test]
    fn test_extra_payment_frequency_bound() {
        let request = LoanRequest {
            principal: dec!(10_000),
            additional_costs: dec!(0),
            annual_interest_rate: dec!(6),
            period_months: 24,
            additional_monthly_payment: dec!(0),
            extra_payments: ExtraPaymentPolicy {
                value: dec!(100),
                limit: 0,
                frequency: 6,
            },
        };

        let out = amortize(&request).unwrap().result;
        // Eligible months are 0, 6, 12, 18 = ceil(24 / 6) at most
        assert!(out.extra_payments_made <= 4);
        assert_eq!(out.extra_payments_made, 4);
        // The first month always carries an extra payment
        assert_eq!(out.schedule[0].extra_payment, dec!(100));
        assert_eq!(out.schedule[1].extra_payment, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 6. Zero-rate loan: straight division, no interest
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate_loan() {
        let request = LoanRequest {
            principal: dec!(1_200),
            additional_costs: dec!(0),
            annual_interest_rate: dec!(0),
            period_months: 12,
            additional_monthly_payment: dec!(0),
            extra_payments: ExtraPaymentPolicy::default(),
        };

        let out = amortize(&request).unwrap().result;
        assert_eq!(out.base_monthly_payment, dec!(100));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.overpay_pct, Decimal::ZERO);
        assert_eq!(out.duration_months, 12);
        assert_eq!(out.total_paid, dec!(1_200));
        assert!(out.fully_repaid);
        assert_eq!(out.schedule.len(), 12);
    }

    // -----------------------------------------------------------------------
    // 7. Schedule invariants: chained balances, monotone non-increasing
    // -----------------------------------------------------------------------
    #[test]
    fn test_schedule_invariants() {
        let out = amortize(&example_loan()).unwrap().result;
        let schedule = &out.schedule;

        assert_eq!(schedule.len(), out.duration_months as usize);
        assert_eq!(schedule[0].opening_balance, dec!(550_000));
        assert_eq!(schedule[0].month, 1);

        for i in 1..schedule.len() {
            assert_eq!(schedule[i].month, schedule[i - 1].month + 1);
            assert_eq!(
                schedule[i].opening_balance,
                schedule[i - 1].closing_balance,
                "month {} opening should chain from month {} closing",
                schedule[i].month,
                schedule[i - 1].month
            );
            assert!(
                schedule[i].closing_balance < schedule[i].opening_balance,
                "balance must shrink every month"
            );
        }

        for row in schedule {
            assert_eq!(
                row.closing_balance,
                row.opening_balance - row.principal - row.extra_payment
            );
        }
    }

    // -----------------------------------------------------------------------
    // 8. Interest accounting: schedule sums match the summary
    // -----------------------------------------------------------------------
    #[test]
    fn test_schedule_sums_match_summary() {
        let out = amortize(&example_loan()).unwrap().result;

        let interest_sum: Decimal = out.schedule.iter().map(|m| m.interest).sum();
        assert_eq!(interest_sum, out.total_interest);

        let extras_sum: Decimal = out.schedule.iter().map(|m| m.extra_payment).sum();
        assert_eq!(extras_sum, out.extra_payments_value);
    }

    // -----------------------------------------------------------------------
    // 9. Overpay percentage
    // -----------------------------------------------------------------------
    #[test]
    fn test_overpay_percentage() {
        let out = amortize(&without_extras(example_loan())).unwrap().result;
        let expected = out.total_interest / dec!(550_000) * dec!(100);
        assert_eq!(out.overpay_pct, expected);
        // ~18.15% of the principal goes to interest over 76 months
        assert!((out.overpay_pct - dec!(18.15)).abs() < dec!(0.05));
    }

    // -----------------------------------------------------------------------
    // 10. Extra-payment value of zero disables the policy entirely
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_extra_value_ignored() {
        let mut request = example_loan();
        request.extra_payments.value = Decimal::ZERO;
        request.extra_payments.limit = 5;

        let out = amortize(&request).unwrap().result;
        assert_eq!(out.extra_payments_made, 0);
        assert_eq!(out.actual_monthly_payment_with_extra, out.actual_monthly_payment);
    }

    // -----------------------------------------------------------------------
    // 11. Validation failures
    // -----------------------------------------------------------------------
    #[test]
    fn test_validation_negative_principal() {
        let mut request = example_loan();
        request.principal = dec!(-1);
        let err = amortize(&request).unwrap_err();
        match err {
            PersonalFinanceError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_zero_period() {
        let mut request = example_loan();
        request.period_months = 0;
        let err = amortize(&request).unwrap_err();
        match err {
            PersonalFinanceError::InvalidInput { field, .. } => assert_eq!(field, "period_months"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_negative_rate() {
        let mut request = example_loan();
        request.annual_interest_rate = dec!(-0.5);
        let err = amortize(&request).unwrap_err();
        match err {
            PersonalFinanceError::InvalidInput { field, .. } => {
                assert_eq!(field, "annual_interest_rate")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_zero_frequency() {
        let mut request = example_loan();
        request.extra_payments.frequency = 0;
        let err = amortize(&request).unwrap_err();
        match err {
            PersonalFinanceError::InvalidInput { field, .. } => {
                assert_eq!(field, "extra_payments.frequency")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    // -----------------------------------------------------------------------
    // 12. Envelope metadata
    // -----------------------------------------------------------------------
    #[test]
    fn test_metadata_populated() {
        let result = amortize(&example_loan()).unwrap();
        assert!(result.methodology.contains("Loan Amortization"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
        assert_eq!(
            result.assumptions.get("period_months").and_then(|v| v.as_u64()),
            Some(76)
        );
    }
}
