pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "savings")]
pub mod savings;

pub use error::PersonalFinanceError;
pub use types::*;

/// Standard result type for all personal-finance operations
pub type PersonalFinanceResult<T> = Result<T, PersonalFinanceError>;
