//! Top expenses report
//!
//! The largest expenses of every wallet in a month.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::display::report::{double_separator, format_header, right_align, truncate};
use crate::error::PurseResult;
use crate::services::{FinanceService, TopExpenses};
use crate::storage::FinanceRepository;

use super::{csv_amount, month_label, CSV_DATE_FORMAT, REPORT_WIDTH};

/// Month report of each wallet's largest expenses
#[derive(Debug, Clone, Serialize)]
pub struct TopExpensesReport {
    pub year: i32,
    pub month: u32,
    pub wallets: TopExpenses,
}

impl TopExpensesReport {
    /// Generate the report for a calendar month
    pub fn generate<R>(repository: &R, year: i32, month: u32) -> PurseResult<Self>
    where
        R: FinanceRepository + ?Sized,
    {
        let wallets = FinanceService::new(repository).top_expenses_per_wallet(year, month)?;
        Ok(Self {
            year,
            month,
            wallets,
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();
        let title = format!("Top Expenses: {}", month_label(self.year, self.month));

        output.push_str(&format_header(&title, REPORT_WIDTH));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if self.wallets.is_empty() {
            output.push_str("No wallets found.\n");
            return output;
        }

        for entry in self.wallets.wallets() {
            output.push_str(&format!("\n{}\n", entry.wallet_name));

            if entry.expenses.is_empty() {
                output.push_str("  (no expenses)\n");
                continue;
            }

            for (rank, txn) in entry.expenses.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {:<12} {} {}\n",
                    rank + 1,
                    txn.date.format(&settings.date_format).to_string(),
                    right_align(&settings.format_money(txn.amount), 12),
                    truncate(&txn.description, 40),
                ));
            }
        }

        output
    }

    /// Export the report to CSV, one row per expense
    ///
    /// Wallets without expenses contribute no rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> PurseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Wallet", "Rank", "Date", "Amount", "Description"])?;

        for entry in self.wallets.wallets() {
            for (rank, txn) in entry.expenses.iter().enumerate() {
                csv.write_record([
                    entry.wallet_name.clone(),
                    (rank + 1).to_string(),
                    txn.date.format(CSV_DATE_FORMAT).to_string(),
                    csv_amount(txn.amount),
                    txn.description.clone(),
                ])?;
            }
        }

        csv.flush()?;
        Ok(())
    }

    /// Export the report as pretty-printed JSON
    pub fn export_json<W: Write>(&self, writer: W) -> PurseResult<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
