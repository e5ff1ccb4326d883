//! Wallet CLI commands
//!
//! Implements CLI commands for wallet management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::wallet::{format_wallet_details, format_wallet_list};
use crate::error::{PurseError, PurseResult};
use crate::models::Money;
use crate::services::{WalletService, WalletSummary};
use crate::storage::{FinanceRepository, Storage};

/// Wallet subcommands
#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Create a new wallet
    Create {
        /// Wallet name
        name: String,
        /// Starting balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        balance: String,
        /// Currency code, defaults to the configured currency
        #[arg(short, long)]
        currency: Option<String>,
    },
    /// List all wallets with balances
    List,
    /// Show wallet details
    Show {
        /// Wallet name or ID
        wallet: String,
        /// Number of recent transactions to show
        #[arg(short, long, default_value = "10")]
        recent: usize,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(
    storage: &Storage,
    settings: &Settings,
    cmd: WalletCommands,
) -> PurseResult<()> {
    let service = WalletService::new(storage);

    match cmd {
        WalletCommands::Create {
            name,
            balance,
            currency,
        } => {
            let initial_balance = Money::parse(&balance).map_err(|e| {
                PurseError::Validation(format!(
                    "Invalid balance format: '{}'. Use format like '1000.00' or '1000'. Error: {}",
                    balance, e
                ))
            })?;
            let currency = currency.unwrap_or_else(|| settings.default_currency.clone());

            let wallet = service.create(&name, &currency, initial_balance)?;

            println!("Created wallet: {}", wallet.name);
            println!("  Currency: {}", wallet.currency);
            println!(
                "  Initial Balance: {}",
                settings.format_money(wallet.initial_balance)
            );
            println!("  ID: {}", wallet.id);
        }

        WalletCommands::List => {
            let summaries = service.list_with_balances()?;
            println!("{}", format_wallet_list(&summaries, settings));
        }

        WalletCommands::Show { wallet, recent } => {
            let found = service.require(&wallet)?;
            print!(
                "{}",
                format_wallet_details(&WalletSummary::from(found), settings, recent)
            );
        }
    }

    Ok(())
}

/// Print the wallet table for any repository
///
/// Used where no [`Storage`] is available, such as demo runs.
pub fn print_wallet_list<R>(repository: &R, settings: &Settings) -> PurseResult<()>
where
    R: FinanceRepository + ?Sized,
{
    let summaries: Vec<WalletSummary> = repository
        .get_all_wallets()?
        .into_iter()
        .map(WalletSummary::from)
        .collect();
    println!("{}", format_wallet_list(&summaries, settings));
    Ok(())
}
