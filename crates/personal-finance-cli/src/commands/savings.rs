use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::savings::{
    project_contributions, project_recurring_deposit, Compounding, ContributionRequest,
    RecurringDepositRequest,
};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum CompoundingArg {
    Monthly,
    Annual,
}

impl From<CompoundingArg> for Compounding {
    fn from(arg: CompoundingArg) -> Self {
        match arg {
            CompoundingArg::Monthly => Compounding::Monthly,
            CompoundingArg::Annual => Compounding::Annual,
        }
    }
}

/// Arguments for the contribution growth projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CompoundArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount set aside each month
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Annual interest rate as a decimal fraction (0.073 = 7.3%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// How often interest is credited
    #[arg(long, default_value = "monthly")]
    pub compounding: CompoundingArg,
}

/// Arguments for the recurring-deposit projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DepositArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Balance already in the account
    #[arg(long, default_value = "0")]
    pub opening: Decimal,

    /// Deposit made each period
    #[arg(long)]
    pub deposit: Option<Decimal>,

    /// Interest rate per period as a decimal fraction
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of periods to project
    #[arg(long)]
    pub periods: Option<u32>,
}

pub fn run_compound(args: CompoundArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ContributionRequest = if let Some(ref path) = args.input {
        input::file::load(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ContributionRequest {
            monthly_contribution: args
                .value
                .ok_or("--value is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding: args.compounding.into(),
        }
    };

    let output = project_contributions(&request)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_deposit(args: DepositArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: RecurringDepositRequest = if let Some(ref path) = args.input {
        input::file::load(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        RecurringDepositRequest {
            opening_balance: args.opening,
            deposit: args
                .deposit
                .ok_or("--deposit is required (or provide --input)")?,
            period_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            periods: args
                .periods
                .ok_or("--periods is required (or provide --input)")?,
        }
    };

    let output = project_recurring_deposit(&request)?;
    Ok(serde_json::to_value(output)?)
}
