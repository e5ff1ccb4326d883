//! purse - terminal-based personal finance reporting
//!
//! Wallets hold an initial balance and a log of income and expense
//! transactions. Expenses larger than the current balance are refused. Two
//! month reports read the wallets back: transactions grouped by type, and
//! each wallet's largest expenses.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: the [`PurseError`] type
//! - `models`: wallets, transactions, money and IDs
//! - `storage`: the [`storage::FinanceRepository`] trait, the JSON store and
//!   an in-memory repository with seeded sample data
//! - `services`: wallet management and the reporting queries
//! - `reports`: month reports with terminal, CSV and JSON output
//! - `display`, `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use purse::reports::MonthlyTypeReport;
//! use purse::storage::InMemoryRepository;
//!
//! let repo = InMemoryRepository::with_sample_data(42, now, &Default::default());
//! let report = MonthlyTypeReport::generate(&repo, 2025, 10)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PurseError, PurseResult};
