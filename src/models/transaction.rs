//! Transaction model
//!
//! A single dated money movement, typed as income or expense. Amounts are
//! always non-negative; the type carries the direction.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{TransactionId, WalletId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Parse a transaction type from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "inflow" => Some(Self::Income),
            "expense" | "out" | "outflow" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Sign applied to the amount when computing a balance
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// When the money moved
    pub date: NaiveDateTime,

    /// Non-negative amount; direction comes from `transaction_type`
    pub amount: Money,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(default)]
    pub description: String,

    /// Owning wallet, set when the transaction is attached to one
    #[serde(default)]
    pub wallet_id: Option<WalletId>,
}

impl Transaction {
    /// Create a new, unattached transaction
    pub fn new(date: NaiveDateTime, amount: Money, transaction_type: TransactionType) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            amount,
            transaction_type,
            description: String::new(),
            wallet_id: None,
        }
    }

    pub fn income(date: NaiveDateTime, amount: Money) -> Self {
        Self::new(date, amount, TransactionType::Income)
    }

    pub fn expense(date: NaiveDateTime, amount: Money) -> Self {
        Self::new(date, amount, TransactionType::Expense)
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Check whether the transaction falls in the given calendar month
    ///
    /// Months outside 1-12 never match.
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// The amount with the sign implied by the transaction type
    pub fn signed_amount(&self) -> Money {
        self.transaction_type.signed(self.amount)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.transaction_type,
            self.amount,
            self.description
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Transaction amount cannot be negative ({})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Transaction amount {} exceeds the maximum of {}",
                amount,
                Money::max_amount()
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::expense(at(2025, 10, 5), Money::from_units(150))
            .with_description("Groceries");

        assert!(txn.is_expense());
        assert!(!txn.is_income());
        assert_eq!(txn.description, "Groceries");
        assert_eq!(txn.wallet_id, None);
        assert_eq!(txn.signed_amount(), Money::from_units(-150));
    }

    #[test]
    fn test_is_in_month() {
        let txn = Transaction::income(at(2025, 10, 31), Money::from_units(1));
        assert!(txn.is_in_month(2025, 10));
        assert!(!txn.is_in_month(2025, 11));
        assert!(!txn.is_in_month(2024, 10));
        assert!(!txn.is_in_month(2025, 0));
        assert!(!txn.is_in_month(2025, 13));
    }

    #[test]
    fn test_validation() {
        let ok = Transaction::income(at(2025, 1, 1), Money::zero());
        assert!(ok.validate().is_ok());

        let negative = Transaction::income(at(2025, 1, 1), Money::from_cents(-1));
        assert_eq!(
            negative.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-1)))
        );
    }

    #[test]
    fn test_oversized_amount_is_invalid() {
        let at_limit = Transaction::income(at(2025, 1, 1), Money::max_amount());
        assert!(at_limit.validate().is_ok());

        let huge = Money::new(rust_decimal::Decimal::MAX);
        let oversized = Transaction::income(at(2025, 1, 1), huge);
        assert_eq!(
            oversized.validate(),
            Err(TransactionValidationError::AmountTooLarge(huge))
        );
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!(TransactionType::parse("Income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse(" expense "), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("out"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("transfer"), None);
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::expense(at(2025, 10, 5), Money::from_cents(4999))
            .with_description("Books");

        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["amount"], "49.99");

        let deserialized: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, txn);
    }

    #[test]
    fn test_display() {
        let txn = Transaction::income(at(2025, 1, 15), Money::from_units(50))
            .with_description("Refund");
        assert_eq!(format!("{}", txn), "2025-01-15 Income $50.00 Refund");
    }
}
