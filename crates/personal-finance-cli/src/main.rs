mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::lending::{AmortizeArgs, PaymentArgs};
use commands::savings::{CompoundArgs, DepositArgs};

/// Household lending and savings calculations
#[derive(Parser)]
#[command(
    name = "pfa",
    version,
    about = "Household lending and savings calculations",
    long_about = "A CLI for household finance calculations with decimal precision. \
                  Supports loan amortization with extra principal payments, annuity \
                  payment lookup, and compound savings projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortize a loan month by month with optional extra payments
    Amortize(AmortizeArgs),
    /// Calculate the fixed annuity payment for a loan
    Payment(PaymentArgs),
    /// Project compound growth of a monthly contribution plan
    Compound(CompoundArgs),
    /// Project a recurring-deposit account from an opening balance
    Deposit(DepositArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::lending::run_amortize(args),
        Commands::Payment(args) => commands::lending::run_payment(args),
        Commands::Compound(args) => commands::savings::run_compound(args),
        Commands::Deposit(args) => commands::savings::run_deposit(args),
        Commands::Version => {
            println!("pfa {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
