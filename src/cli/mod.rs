//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod report;
pub mod transaction;
pub mod wallet;

pub use report::{handle_report_command, MonthReportArgs, ReportCommands, ReportFormat};
pub use transaction::{handle_transaction_command, parse_date, TransactionCommands};
pub use wallet::{handle_wallet_command, print_wallet_list, WalletCommands};
