//! In-memory repository
//!
//! Holds wallets in a plain vector. Used for `--demo` runs and as a test
//! double for the reporting layer.

use chrono::NaiveDateTime;

use crate::config::settings::SampleSettings;
use crate::error::PurseResult;
use crate::models::{Transaction, Wallet};

use super::repository::{transactions_in_month, FinanceRepository};
use super::sample::SampleDataGenerator;

/// Repository over wallets kept in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    wallets: Vec<Wallet>,
}

impl InMemoryRepository {
    pub fn new(wallets: Vec<Wallet>) -> Self {
        Self { wallets }
    }

    /// Build a repository filled by the seeded sample generator
    pub fn with_sample_data(seed: u64, anchor: NaiveDateTime, settings: &SampleSettings) -> Self {
        Self::new(
            SampleDataGenerator::new(seed, anchor)
                .with_settings(settings)
                .generate(),
        )
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Mutable access for callers that record transactions directly
    pub fn wallets_mut(&mut self) -> &mut [Wallet] {
        &mut self.wallets
    }

    pub fn push(&mut self, wallet: Wallet) {
        self.wallets.push(wallet);
    }
}

impl FinanceRepository for InMemoryRepository {
    fn get_all_wallets(&self) -> PurseResult<Vec<Wallet>> {
        Ok(self.wallets.clone())
    }

    fn get_transactions_by_month(&self, year: i32, month: u32) -> PurseResult<Vec<Transaction>> {
        Ok(transactions_in_month(&self.wallets, year, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{Datelike, NaiveDate};

    #[test]
    fn test_new_and_push() {
        let mut repo = InMemoryRepository::default();
        assert!(repo.get_all_wallets().unwrap().is_empty());

        repo.push(Wallet::new("Cash"));
        assert_eq!(repo.wallets().len(), 1);
    }

    #[test]
    fn test_record_through_wallets_mut() {
        let mut repo = InMemoryRepository::new(vec![Wallet::with_initial_balance(
            "Cash",
            Money::from_units(10),
        )]);
        let date = NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        repo.wallets_mut()[0]
            .add_transaction(Transaction::expense(date, Money::from_units(4)))
            .unwrap();

        let october = repo.get_transactions_by_month(2025, 10).unwrap();
        assert_eq!(october.len(), 1);
        assert_eq!(repo.wallets()[0].current_balance(), Money::from_units(6));
    }

    #[test]
    fn test_sample_data_month_filter() {
        let anchor = NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let repo = InMemoryRepository::with_sample_data(11, anchor, &SampleSettings::default());

        let total: usize = repo.wallets().iter().map(|w| w.transactions().len()).sum();
        let by_month: usize = [(2025, 8), (2025, 9), (2025, 10)]
            .iter()
            .map(|(y, m)| repo.get_transactions_by_month(*y, *m).unwrap().len())
            .sum();
        assert_eq!(total, by_month);

        for txn in repo.get_transactions_by_month(2025, 9).unwrap() {
            assert_eq!(txn.date.month(), 9);
        }
    }
}
