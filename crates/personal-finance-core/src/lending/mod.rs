//! Loan amortization with flat and scheduled extra principal payments.

pub mod amortization;

pub use amortization::{
    amortize, AmortizationMonth, AmortizationResult, ExtraPaymentPolicy, LoanRequest,
};
