//! Transaction CLI commands
//!
//! Implements CLI commands for recording transactions.

use chrono::{NaiveDate, NaiveDateTime};
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{PurseError, PurseResult};
use crate::models::{Money, TransactionType};
use crate::services::{RecordTransactionInput, WalletService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record a transaction in a wallet
    Add {
        /// Wallet name or ID
        wallet: String,
        /// Amount (e.g., "50.00"), always positive
        amount: String,
        /// Transaction type (income or expense)
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Transaction date (YYYY-MM-DD or "YYYY-MM-DD HH:MM"), defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PurseResult<()> {
    let service = WalletService::new(storage);

    match cmd {
        TransactionCommands::Add {
            wallet,
            amount,
            kind,
            date,
            description,
        } => {
            let transaction_type = TransactionType::parse(&kind).ok_or_else(|| {
                PurseError::Validation(format!(
                    "Invalid transaction type: '{}'. Valid types: income, expense",
                    kind
                ))
            })?;

            let amount = Money::parse(&amount).map_err(|e| {
                PurseError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '50.00' or '50'. Error: {}",
                    amount, e
                ))
            })?;

            let date = match date {
                Some(date_str) => parse_date(&date_str)?,
                None => chrono::Local::now().naive_local(),
            };

            let input = RecordTransactionInput {
                date,
                amount,
                transaction_type,
                description,
            };
            let txn = service.record_transaction(&wallet, input)?;
            let balance = service.require(&wallet)?.current_balance();

            println!(
                "Recorded {} of {} on {}",
                txn.transaction_type.to_string().to_lowercase(),
                settings.format_money(txn.amount),
                txn.date.format(&settings.date_format)
            );
            println!("  New balance: {}", settings.format_money(balance));
            println!("  ID: {}", txn.id);
        }
    }

    Ok(())
}

/// Parse a date given on the command line
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DD HH:MM`, and
/// `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(input: &str) -> PurseResult<NaiveDateTime> {
    let input = input.trim();

    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            PurseError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD or \"YYYY-MM-DD HH:MM\"",
                input
            ))
        })
}
