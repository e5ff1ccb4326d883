//! Wallet service
//!
//! Wallet management on top of the JSON store: creation, lookup, balances,
//! and recording transactions through the balance-checked path.

use chrono::NaiveDateTime;

use crate::error::{PurseError, PurseResult};
use crate::models::{Money, Transaction, TransactionType, Wallet};
use crate::storage::Storage;

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
}

/// A wallet with its computed totals
#[derive(Debug, Clone)]
pub struct WalletSummary {
    pub wallet: Wallet,
    /// Initial balance plus income minus expenses
    pub balance: Money,
    pub income: Money,
    pub expenses: Money,
    pub transaction_count: usize,
}

impl From<Wallet> for WalletSummary {
    fn from(wallet: Wallet) -> Self {
        Self {
            balance: wallet.current_balance(),
            income: wallet.total_income(),
            expenses: wallet.total_expenses(),
            transaction_count: wallet.transactions().len(),
            wallet,
        }
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    pub date: NaiveDateTime,
    pub amount: Money,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
}

impl<'a> WalletService<'a> {
    /// Create a new wallet service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new wallet
    pub fn create(
        &self,
        name: &str,
        currency: &str,
        initial_balance: Money,
    ) -> PurseResult<Wallet> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PurseError::Validation("Wallet name cannot be empty".into()));
        }

        if self.storage.wallets.name_exists(name)? {
            return Err(PurseError::Duplicate {
                entity_type: "Wallet",
                identifier: name.to_string(),
            });
        }

        let currency = currency.trim().to_uppercase();
        let wallet = Wallet::with_initial_balance(name, initial_balance).with_currency(currency);
        wallet
            .validate()
            .map_err(|e| PurseError::Validation(e.to_string()))?;

        self.storage.wallets.upsert(wallet.clone())?;
        self.storage.wallets.save()?;

        tracing::info!(wallet = %wallet.name, id = %wallet.id, "created wallet");
        Ok(wallet)
    }

    /// Find a wallet by name or ID string
    pub fn find(&self, identifier: &str) -> PurseResult<Option<Wallet>> {
        if let Some(wallet) = self.storage.wallets.get_by_name(identifier)? {
            return Ok(Some(wallet));
        }

        match identifier.parse() {
            Ok(id) => self.storage.wallets.get(id),
            Err(_) => Ok(None),
        }
    }

    /// Find a wallet or fail with a not-found error
    pub fn require(&self, identifier: &str) -> PurseResult<Wallet> {
        self.find(identifier)?
            .ok_or_else(|| PurseError::wallet_not_found(identifier))
    }

    /// All wallets with their computed balances
    pub fn list_with_balances(&self) -> PurseResult<Vec<WalletSummary>> {
        Ok(self
            .storage
            .wallets
            .get_all()?
            .into_iter()
            .map(WalletSummary::from)
            .collect())
    }

    /// Record a transaction in a wallet
    ///
    /// Expenses larger than the current balance are rejected; the stored
    /// wallet is only updated and saved when the transaction is accepted.
    pub fn record_transaction(
        &self,
        identifier: &str,
        input: RecordTransactionInput,
    ) -> PurseResult<Transaction> {
        let mut wallet = self.require(identifier)?;

        let mut txn = Transaction::new(input.date, input.amount, input.transaction_type);
        if let Some(description) = input.description {
            txn = txn.with_description(description.trim());
        }

        let recorded = match wallet.add_transaction(txn).cloned() {
            Ok(recorded) => recorded,
            Err(e) => {
                tracing::warn!(wallet = %wallet.name, error = %e, "rejected transaction");
                return Err(PurseError::from_wallet_error(wallet.name.as_str(), e));
            }
        };

        self.storage.wallets.upsert(wallet)?;
        self.storage.wallets.save()?;

        tracing::info!(
            id = %recorded.id,
            kind = %recorded.transaction_type,
            amount = %recorded.amount,
            "recorded transaction"
        );
        Ok(recorded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PursePaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PursePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(transaction_type: TransactionType, units: i64) -> RecordTransactionInput {
        RecordTransactionInput {
            date: NaiveDate::from_ymd_opt(2025, 10, 3)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            amount: Money::from_units(units),
            transaction_type,
            description: Some("  Coffee  ".into()),
        }
    }

    #[test]
    fn test_create_wallet() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        let wallet = service
            .create("  Main Card ", "usd", Money::from_units(1000))
            .unwrap();

        assert_eq!(wallet.name, "Main Card");
        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.current_balance(), Money::from_units(1000));
    }

    #[test]
    fn test_create_rejects_empty_and_duplicate_names() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        assert!(service.create("   ", "USD", Money::zero()).unwrap_err().is_validation());

        service.create("Cash", "USD", Money::zero()).unwrap();
        assert!(matches!(
            service.create("cash", "USD", Money::zero()),
            Err(PurseError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let wallet = service.create("Cash", "USD", Money::zero()).unwrap();

        assert_eq!(service.find("cash").unwrap().unwrap().id, wallet.id);
        let by_id = service.find(&wallet.id.as_uuid().to_string()).unwrap();
        assert_eq!(by_id.unwrap().id, wallet.id);
        assert!(service.find("Savings").unwrap().is_none());
        assert!(service.require("Savings").unwrap_err().is_not_found());
    }

    #[test]
    fn test_record_transaction_persists() {
        let (temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        service.create("Cash", "USD", Money::from_units(100)).unwrap();

        let txn = service
            .record_transaction("Cash", input(TransactionType::Expense, 30))
            .unwrap();
        assert_eq!(txn.description, "Coffee");

        let paths = PursePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        let summaries = WalletService::new(&reopened).list_with_balances().unwrap();
        assert_eq!(summaries[0].balance, Money::from_units(70));
        assert_eq!(summaries[0].expenses, Money::from_units(30));
        assert_eq!(summaries[0].transaction_count, 1);
    }

    #[test]
    fn test_record_transaction_rejects_overdraft() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        service.create("Cash", "USD", Money::from_units(100)).unwrap();
        service
            .record_transaction("Cash", input(TransactionType::Income, 50))
            .unwrap();

        let err = service
            .record_transaction("Cash", input(TransactionType::Expense, 200))
            .unwrap_err();
        assert!(err.is_insufficient_funds());

        let wallet = service.require("Cash").unwrap();
        assert_eq!(wallet.current_balance(), Money::from_units(150));
        assert_eq!(wallet.transactions().len(), 1);
    }
}
