//! Core data models for purse
//!
//! Wallets, their transactions, and the money and ID types they are built on.

pub mod ids;
pub mod money;
pub mod transaction;
pub mod wallet;

pub use ids::{TransactionId, WalletId};
pub use money::{Money, MoneyParseError, MAX_AMOUNT_UNITS};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
pub use wallet::{Wallet, WalletError, WalletValidationError, DEFAULT_CURRENCY};
