//! Wallet model
//!
//! A wallet holds an initial balance and an append-only log of transactions.
//! The current balance is always derived from that log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;
use super::money::Money;
use super::transaction::{Transaction, TransactionType, TransactionValidationError};

/// Currency code used when none is given
pub const DEFAULT_CURRENCY: &str = "USD";

/// A wallet (account) and its transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: WalletId,

    /// Display name, used as the label in reports
    pub name: String,

    /// Currency code; informational only
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Balance before any recorded transaction (may be negative)
    pub initial_balance: Money,

    /// Transactions in insertion order
    #[serde(default)]
    transactions: Vec<Transaction>,

    /// When the wallet was created
    pub created_at: DateTime<Utc>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Wallet {
    /// Create an empty wallet with a zero initial balance
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: WalletId::new(),
            name: name.into(),
            currency: default_currency(),
            initial_balance: Money::zero(),
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a wallet with an initial balance
    pub fn with_initial_balance(name: impl Into<String>, initial_balance: Money) -> Self {
        let mut wallet = Self::new(name);
        wallet.initial_balance = initial_balance;
        wallet
    }

    /// Builder-style currency setter
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Transactions in the order they were added
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Current balance: initial balance plus income minus expenses
    ///
    /// Recomputed on every call so it can never drift from the transaction log.
    pub fn current_balance(&self) -> Money {
        self.initial_balance
            + self
                .transactions
                .iter()
                .map(Transaction::signed_amount)
                .sum::<Money>()
    }

    pub fn total_income(&self) -> Money {
        self.total_of(TransactionType::Income)
    }

    pub fn total_expenses(&self) -> Money {
        self.total_of(TransactionType::Expense)
    }

    fn total_of(&self, transaction_type: TransactionType) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .map(|t| t.amount)
            .sum()
    }

    /// Record a transaction, refusing expenses the balance cannot cover
    ///
    /// An expense whose amount exceeds the balance at the moment of insertion
    /// is rejected and the wallet is left unchanged. On success the
    /// transaction is attached to this wallet and appended.
    pub fn add_transaction(
        &mut self,
        mut transaction: Transaction,
    ) -> Result<&Transaction, WalletError> {
        transaction
            .validate()
            .map_err(WalletError::InvalidTransaction)?;

        let available = self.current_balance();
        if transaction.is_expense() && transaction.amount > available {
            return Err(WalletError::InsufficientFunds {
                needed: transaction.amount,
                available,
            });
        }
        available
            .checked_add(transaction.signed_amount())
            .filter(Money::is_within_limit)
            .ok_or(WalletError::BalanceOutOfRange)?;

        transaction.wallet_id = Some(self.id);
        self.transactions.push(transaction);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Append historical transactions without the balance check
    ///
    /// This is the trusted ingestion path for seeding and imports: a history
    /// replayed against a point-in-time balance can look invalid even when it
    /// is not. Transactions are still attached to this wallet.
    pub fn load_history<I>(&mut self, transactions: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        let id = self.id;
        self.transactions
            .extend(transactions.into_iter().map(|mut t| {
                t.wallet_id = Some(id);
                t
            }));
    }

    /// Validate the wallet and its transaction log
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }

        let name_len = self.name.chars().count();
        if name_len > 100 {
            return Err(WalletValidationError::NameTooLong(name_len));
        }

        if !self.initial_balance.is_within_limit() {
            return Err(WalletValidationError::InitialBalanceTooLarge(self.initial_balance));
        }

        for txn in &self.transactions {
            txn.validate()
                .map_err(|e| WalletValidationError::InvalidTransaction(txn.id.to_string(), e))?;

            if txn.wallet_id != Some(self.id) {
                return Err(WalletValidationError::ForeignTransaction(txn.id.to_string()));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.currency)
    }
}

/// Failure of the controlled insertion path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// An expense larger than the current balance
    InsufficientFunds { needed: Money, available: Money },
    /// The resulting balance would leave the supported range
    BalanceOutOfRange,
    InvalidTransaction(TransactionValidationError),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds { needed, available } => write!(
                f,
                "Insufficient funds in the wallet: need {}, have {}",
                needed, available
            ),
            Self::BalanceOutOfRange => write!(
                f,
                "Resulting balance would exceed the maximum of {}",
                Money::max_amount()
            ),
            Self::InvalidTransaction(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WalletError {}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
    NameTooLong(usize),
    InitialBalanceTooLarge(Money),
    InvalidTransaction(String, TransactionValidationError),
    ForeignTransaction(String),
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Wallet name too long ({} chars, max 100)", len)
            }
            Self::InitialBalanceTooLarge(amount) => write!(
                f,
                "Initial balance {} exceeds the maximum of {}",
                amount,
                Money::max_amount()
            ),
            Self::InvalidTransaction(id, e) => write!(f, "Transaction {}: {}", id, e),
            Self::ForeignTransaction(id) => {
                write!(f, "Transaction {} is attached to another wallet", id)
            }
        }
    }
}

impl std::error::Error for WalletValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn today() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn wallet_with(initial: i64) -> Wallet {
        Wallet::with_initial_balance("Test", Money::from_units(initial))
    }

    #[test]
    fn test_new_wallet() {
        let wallet = Wallet::new("Cash");
        assert_eq!(wallet.name, "Cash");
        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.initial_balance, Money::zero());
        assert!(wallet.transactions().is_empty());
        assert_eq!(wallet.current_balance(), Money::zero());
    }

    #[test]
    fn test_balance_scenario() {
        let mut wallet = wallet_with(100);

        wallet
            .add_transaction(Transaction::income(today(), Money::from_units(50)))
            .unwrap();
        assert_eq!(wallet.current_balance(), Money::from_units(150));

        wallet
            .add_transaction(Transaction::expense(today(), Money::from_units(30)))
            .unwrap();
        assert_eq!(wallet.current_balance(), Money::from_units(120));

        let err = wallet
            .add_transaction(Transaction::expense(today(), Money::from_units(200)))
            .unwrap_err();
        assert_eq!(
            err,
            WalletError::InsufficientFunds {
                needed: Money::from_units(200),
                available: Money::from_units(120),
            }
        );
        assert_eq!(wallet.current_balance(), Money::from_units(120));
        assert_eq!(wallet.transactions().len(), 2);
    }

    #[test]
    fn test_expense_exceeding_balance_is_rejected() {
        let mut wallet = wallet_with(100);
        let result = wallet.add_transaction(
            Transaction::expense(today(), Money::from_units(150)).with_description("Test"),
        );
        assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_expense_equal_to_balance_succeeds() {
        let mut wallet = wallet_with(100);
        wallet
            .add_transaction(Transaction::expense(today(), Money::from_units(100)))
            .unwrap();
        assert!(wallet.current_balance().is_zero());
    }

    #[test]
    fn test_expense_one_cent_over_fails() {
        let mut wallet = wallet_with(100);
        let result =
            wallet.add_transaction(Transaction::expense(today(), Money::from_cents(10001)));
        assert!(result.is_err());
        assert_eq!(wallet.current_balance(), Money::from_units(100));
    }

    #[test]
    fn test_negative_balance_rejects_any_expense() {
        let mut wallet = wallet_with(-50);
        assert!(wallet
            .add_transaction(Transaction::expense(today(), Money::zero()))
            .is_err());
        wallet
            .add_transaction(Transaction::income(today(), Money::from_units(10)))
            .unwrap();
        assert_eq!(wallet.current_balance(), Money::from_units(-40));
    }

    #[test]
    fn test_add_transaction_attaches_wallet() {
        let mut wallet = wallet_with(10);
        let wallet_id = wallet.id;
        let added = wallet
            .add_transaction(Transaction::income(today(), Money::from_units(5)))
            .unwrap();
        assert_eq!(added.wallet_id, Some(wallet_id));
        assert!(wallet.validate().is_ok());
    }

    #[test]
    fn test_oversized_income_is_rejected() {
        let mut wallet = wallet_with(1);
        let result = wallet.add_transaction(Transaction::income(
            today(),
            Money::new(rust_decimal::Decimal::MAX),
        ));

        assert!(matches!(
            result,
            Err(WalletError::InvalidTransaction(
                TransactionValidationError::AmountTooLarge(_)
            ))
        ));
        assert_eq!(wallet.current_balance(), Money::from_units(1));
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_income_past_balance_limit_is_rejected() {
        let mut wallet = wallet_with(0);
        wallet
            .add_transaction(Transaction::income(today(), Money::max_amount()))
            .unwrap();

        let result = wallet.add_transaction(Transaction::income(today(), Money::from_units(1)));
        assert_eq!(result.unwrap_err(), WalletError::BalanceOutOfRange);
        assert_eq!(wallet.current_balance(), Money::max_amount());

        wallet
            .add_transaction(Transaction::expense(today(), Money::from_units(1)))
            .unwrap();
        assert_eq!(wallet.transactions().len(), 2);
    }

    #[test]
    fn test_name_length_counts_characters() {
        let cyrillic = Wallet::new("Кошелёк".repeat(10));
        assert_eq!(cyrillic.name.chars().count(), 70);
        assert!(cyrillic.name.len() > 100);
        assert!(cyrillic.validate().is_ok());

        let too_long = Wallet::new("Ж".repeat(101));
        assert_eq!(
            too_long.validate(),
            Err(WalletValidationError::NameTooLong(101))
        );
    }

    #[test]
    fn test_oversized_initial_balance_is_invalid() {
        let wallet = Wallet::with_initial_balance("Vault", Money::new(rust_decimal::Decimal::MAX));
        assert!(matches!(
            wallet.validate(),
            Err(WalletValidationError::InitialBalanceTooLarge(_))
        ));
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let mut wallet = wallet_with(10);
        let result = wallet.add_transaction(Transaction::income(today(), Money::from_units(-5)));
        assert!(matches!(result, Err(WalletError::InvalidTransaction(_))));
        assert!(wallet.transactions().is_empty());
    }

    #[test]
    fn test_load_history_bypasses_balance_check() {
        let mut wallet = wallet_with(0);
        wallet.load_history(vec![
            Transaction::expense(today(), Money::from_units(30)),
            Transaction::income(today(), Money::from_units(50)),
        ]);

        assert_eq!(wallet.current_balance(), Money::from_units(20));
        assert_eq!(wallet.total_income(), Money::from_units(50));
        assert_eq!(wallet.total_expenses(), Money::from_units(30));
        assert!(wallet
            .transactions()
            .iter()
            .all(|t| t.wallet_id == Some(wallet.id)));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut wallet = wallet_with(1000);
        for units in [5, 1, 3] {
            wallet
                .add_transaction(Transaction::expense(today(), Money::from_units(units)))
                .unwrap();
        }
        let amounts: Vec<_> = wallet.transactions().iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_units(5), Money::from_units(1), Money::from_units(3)]
        );
    }

    #[test]
    fn test_validation() {
        let mut wallet = Wallet::new("Valid");
        assert!(wallet.validate().is_ok());

        wallet.name = "   ".into();
        assert_eq!(wallet.validate(), Err(WalletValidationError::EmptyName));

        wallet.name = "a".repeat(101);
        assert!(matches!(
            wallet.validate(),
            Err(WalletValidationError::NameTooLong(101))
        ));
    }

    #[test]
    fn test_foreign_transaction_fails_validation() {
        let mut source = Wallet::new("Source");
        source.load_history(vec![Transaction::income(today(), Money::from_units(1))]);

        let json = serde_json::to_value(&source).unwrap();
        let mut other: Wallet = serde_json::from_value(json).unwrap();
        other.id = WalletId::new();

        assert!(matches!(
            other.validate(),
            Err(WalletValidationError::ForeignTransaction(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let mut wallet = Wallet::with_initial_balance("Main Card", Money::from_units(1000))
            .with_currency("EUR");
        wallet
            .add_transaction(Transaction::expense(today(), Money::from_cents(1999)))
            .unwrap();

        let json = serde_json::to_string(&wallet).unwrap();
        let deserialized: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, wallet.id);
        assert_eq!(deserialized.currency, "EUR");
        assert_eq!(deserialized.transactions(), wallet.transactions());
        assert_eq!(deserialized.current_balance(), Money::from_cents(98001));
    }

    #[test]
    fn test_display() {
        let wallet = Wallet::new("Cash");
        assert_eq!(format!("{}", wallet), "Cash (USD)");
    }
}
