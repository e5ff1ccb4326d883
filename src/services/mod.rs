//! Service layer for purse
//!
//! Business logic on top of the storage layer: wallet management with the
//! balance check, and the month reports read through [`FinanceRepository`].
//!
//! [`FinanceRepository`]: crate::storage::FinanceRepository

pub mod finance;
pub mod wallet;

pub use finance::{
    group_by_type, largest_expenses, FinanceService, TopExpenses, TransactionGroup,
    WalletExpenses, TOP_EXPENSE_LIMIT,
};
pub use wallet::{RecordTransactionInput, WalletService, WalletSummary};
