//! Read-side repository abstraction
//!
//! Reporting depends only on this trait, so wallets can come from the JSON
//! store, the in-memory sample generator, or a test double.

use crate::error::PurseResult;
use crate::models::{Transaction, Wallet};

/// Supplies wallets and month-filtered transactions to the reporting layer
pub trait FinanceRepository {
    /// All wallets, each already populated with its own transactions
    fn get_all_wallets(&self) -> PurseResult<Vec<Wallet>>;

    /// Every transaction across all wallets dated in `year`/`month`
    ///
    /// No ordering is guaranteed. Months outside 1-12 match nothing.
    fn get_transactions_by_month(&self, year: i32, month: u32) -> PurseResult<Vec<Transaction>> {
        Ok(transactions_in_month(&self.get_all_wallets()?, year, month))
    }
}

/// Flatten the wallets' transactions, keeping those in the given month
pub fn transactions_in_month(wallets: &[Wallet], year: i32, month: u32) -> Vec<Transaction> {
    wallets
        .iter()
        .flat_map(|w| w.transactions())
        .filter(|t| t.is_in_month(year, month))
        .cloned()
        .collect()
}

impl<R: FinanceRepository + ?Sized> FinanceRepository for &R {
    fn get_all_wallets(&self) -> PurseResult<Vec<Wallet>> {
        (**self).get_all_wallets()
    }

    fn get_transactions_by_month(&self, year: i32, month: u32) -> PurseResult<Vec<Transaction>> {
        (**self).get_transactions_by_month(year, month)
    }
}
