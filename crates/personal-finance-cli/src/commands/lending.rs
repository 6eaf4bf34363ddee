use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use personal_finance_core::lending::{amortize, ExtraPaymentPolicy, LoanRequest};
use personal_finance_core::time_value::{payment, PaymentTiming};

use crate::input;

/// Arguments for loan amortization
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AmortizeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// One-time costs added to the total paid but not amortized
    #[arg(long, default_value = "0")]
    pub additional_costs: Decimal,

    /// Annual interest rate as a percentage (5.36 = 5.36%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Repayment period in months
    #[arg(long)]
    pub period: Option<u32>,

    /// Flat amount added to every monthly payment
    #[arg(long, default_value = "0")]
    pub additional_monthly: Decimal,

    /// Extra principal payment amount (0 disables extras)
    #[arg(long, default_value = "0")]
    pub extra_value: Decimal,

    /// Maximum number of extra payments (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    pub extra_limit: u32,

    /// Month interval between extra payments
    #[arg(long, default_value_t = 1)]
    pub extra_frequency: u32,
}

/// Arguments for the annuity payment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Interest rate per period as a decimal fraction (0.005 = 0.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Number of periods
    #[arg(long)]
    pub periods: u32,

    /// Amount to amortize
    #[arg(long)]
    pub loan: Decimal,

    /// Residual (balloon) value left at the end of the schedule
    #[arg(long, default_value = "0")]
    pub residual: Decimal,

    /// Payments fall due at the start of each period instead of the end
    #[arg(long)]
    pub due_at_start: bool,
}

/// Echo of the payment inputs alongside the computed payment.
#[derive(Serialize)]
struct PaymentBreakdown {
    payment: Decimal,
    rate: Decimal,
    periods: u32,
    loan: Decimal,
    residual: Decimal,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::file::load(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanRequest {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            additional_costs: args.additional_costs,
            annual_interest_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            period_months: args
                .period
                .ok_or("--period is required (or provide --input)")?,
            additional_monthly_payment: args.additional_monthly,
            extra_payments: ExtraPaymentPolicy {
                value: args.extra_value,
                limit: args.extra_limit,
                frequency: args.extra_frequency,
            },
        }
    };

    let output = amortize(&request)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let timing = if args.due_at_start {
        PaymentTiming::PeriodStart
    } else {
        PaymentTiming::PeriodEnd
    };

    let pmt = payment(args.rate, args.periods, args.loan, args.residual, timing)?;
    Ok(serde_json::to_value(PaymentBreakdown {
        payment: pmt,
        rate: args.rate,
        periods: args.periods,
        loan: args.loan,
        residual: args.residual,
    })?)
}
