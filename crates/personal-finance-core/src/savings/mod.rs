//! Savings growth projections: periodic contributions with compound interest.

pub mod compound;

pub use compound::{
    project_contributions, project_recurring_deposit, Compounding, ContributionRequest,
    ContributionResult, RecurringDepositRequest, RecurringDepositResult,
};
