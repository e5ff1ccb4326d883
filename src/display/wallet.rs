//! Wallet display formatting
//!
//! Formats wallets for terminal output in table and detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Money;
use crate::services::WalletSummary;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Txns")]
    transactions: usize,
}

/// Format a list of wallets with balances as a table
pub fn format_wallet_list(summaries: &[WalletSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No wallets found.".to_string();
    }

    let mut rows: Vec<WalletRow> = summaries
        .iter()
        .map(|s| WalletRow {
            name: s.wallet.name.clone(),
            currency: s.wallet.currency.clone(),
            balance: settings.format_money(s.balance),
            income: settings.format_money(s.income),
            expenses: settings.format_money(s.expenses),
            transactions: s.transaction_count,
        })
        .collect();

    if summaries.len() > 1 {
        let total: Money = summaries.iter().map(|s| s.balance).sum();
        rows.push(WalletRow {
            name: "TOTAL".into(),
            currency: String::new(),
            balance: settings.format_money(total),
            income: String::new(),
            expenses: String::new(),
            transactions: summaries.iter().map(|s| s.transaction_count).sum(),
        });
    }

    Table::new(rows)
        .with(Style::psql())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string()
}

/// Format a single wallet's details, with its most recent transactions
pub fn format_wallet_details(summary: &WalletSummary, settings: &Settings, recent: usize) -> String {
    let wallet = &summary.wallet;
    let mut output = String::new();

    output.push_str(&format!("Wallet: {}\n", wallet.name));
    output.push_str(&format!("  ID:              {}\n", wallet.id));
    output.push_str(&format!("  Currency:        {}\n", wallet.currency));
    output.push_str(&format!(
        "  Initial Balance: {}\n",
        settings.format_money(wallet.initial_balance)
    ));
    output.push_str(&format!(
        "  Income:          {}\n",
        settings.format_money(summary.income)
    ));
    output.push_str(&format!(
        "  Expenses:        {}\n",
        settings.format_money(summary.expenses)
    ));
    output.push_str(&format!(
        "  Balance:         {}\n",
        settings.format_money(summary.balance)
    ));
    output.push_str(&format!(
        "  Created:         {}\n",
        wallet.created_at.format("%Y-%m-%d %H:%M")
    ));

    let mut transactions: Vec<_> = wallet.transactions().iter().collect();
    if transactions.is_empty() || recent == 0 {
        return output;
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    output.push_str(&format!("\nRecent transactions ({} total):\n", transactions.len()));
    for txn in transactions.into_iter().take(recent) {
        output.push_str(&format!(
            "  {}  {:<8} {:>12}  {}\n",
            txn.date.format(&settings.date_format),
            txn.transaction_type.to_string(),
            settings.format_money(txn.amount),
            txn.description
        ));
    }

    output
}
