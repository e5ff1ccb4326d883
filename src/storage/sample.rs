//! Deterministic sample data
//!
//! Generates a small set of wallets with a couple of months of random
//! transactions. The random source is seeded explicitly, so the same seed and
//! anchor date always produce the same data.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::config::settings::SampleSettings;
use crate::models::{
    Money, Transaction, TransactionId, TransactionType, Wallet, WalletId, DEFAULT_CURRENCY,
};

/// Wallets created by the generator: name and initial balance in whole units
const SAMPLE_WALLETS: [(&str, i64); 2] = [("Main Card", 1000), ("Cash", 200)];

/// Seeded generator for demo and test data
pub struct SampleDataGenerator {
    rng: StdRng,
    anchor: NaiveDateTime,
    transaction_count: usize,
    window_days: i64,
}

impl SampleDataGenerator {
    /// Create a generator; transactions are dated before `anchor`
    pub fn new(seed: u64, anchor: NaiveDateTime) -> Self {
        let defaults = SampleSettings::default();
        Self {
            rng: StdRng::seed_from_u64(seed),
            anchor,
            transaction_count: defaults.transaction_count,
            window_days: defaults.window_days,
        }
    }

    /// Use the transaction count and date window from settings
    pub fn with_settings(mut self, settings: &SampleSettings) -> Self {
        self.transaction_count = settings.transaction_count;
        self.window_days = settings.window_days;
        self
    }

    fn next_uuid(&mut self) -> uuid::Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }

    /// Produce the wallets with their transaction history
    ///
    /// Transactions are loaded through the trusted history path, so random
    /// expenses are kept even when they would overdraw a wallet.
    pub fn generate(mut self) -> Vec<Wallet> {
        let created_at = self.anchor.and_utc();
        let mut wallets: Vec<Wallet> = SAMPLE_WALLETS
            .iter()
            .map(|(name, balance)| {
                let mut wallet = Wallet::with_initial_balance(*name, Money::from_units(*balance))
                    .with_currency(DEFAULT_CURRENCY);
                wallet.id = WalletId::from_uuid(self.next_uuid());
                wallet.created_at = created_at;
                wallet
            })
            .collect();

        let mut per_wallet: Vec<Vec<Transaction>> = vec![Vec::new(); wallets.len()];
        let window = self.window_days.max(2);

        for number in 1..=self.transaction_count {
            let wallet_index = self.rng.gen_range(0..wallets.len());
            let transaction_type = if self.rng.gen_bool(0.5) {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            let units: i64 = match transaction_type {
                TransactionType::Income => self.rng.gen_range(50..500),
                TransactionType::Expense => self.rng.gen_range(1..150),
            };
            let days_back = self.rng.gen_range(1..window);

            let mut txn = Transaction::new(
                self.anchor - Duration::days(days_back),
                Money::from_units(units),
                transaction_type,
            )
            .with_description(format!("{} Transaction #{}", transaction_type, number));
            txn.id = TransactionId::from_uuid(self.next_uuid());

            per_wallet[wallet_index].push(txn);
        }

        for (wallet, history) in wallets.iter_mut().zip(per_wallet) {
            wallet.load_history(history);
        }

        tracing::debug!(
            transactions = self.transaction_count,
            wallets = wallets.len(),
            "generated sample data"
        );

        wallets
    }
}
