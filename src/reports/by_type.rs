//! Transactions-by-type report
//!
//! A month's transactions partitioned into income and expense groups, the
//! larger group first.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::display::report::{double_separator, format_header, right_align, separator, truncate};
use crate::error::PurseResult;
use crate::models::{Money, TransactionType};
use crate::services::{FinanceService, TransactionGroup};
use crate::storage::FinanceRepository;

use super::{csv_amount, month_label, CSV_DATE_FORMAT, REPORT_WIDTH};

/// Month report of transactions grouped by type
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTypeReport {
    pub year: i32,
    pub month: u32,
    /// Groups ordered by total, largest first
    pub groups: Vec<TransactionGroup>,
    pub total_income: Money,
    pub total_expenses: Money,
}

impl MonthlyTypeReport {
    /// Generate the report for a calendar month
    pub fn generate<R>(repository: &R, year: i32, month: u32) -> PurseResult<Self>
    where
        R: FinanceRepository + ?Sized,
    {
        let groups = FinanceService::new(repository).group_by_type_for_month(year, month)?;

        let total_for = |kind: TransactionType| {
            groups
                .iter()
                .filter(|g| g.transaction_type == kind)
                .map(|g| g.total)
                .sum::<Money>()
        };
        let total_income = total_for(TransactionType::Income);
        let total_expenses = total_for(TransactionType::Expense);

        Ok(Self {
            year,
            month,
            groups,
            total_income,
            total_expenses,
        })
    }

    /// Income minus expenses for the month
    pub fn net(&self) -> Money {
        self.total_income - self.total_expenses
    }

    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(|g| g.transactions.len()).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let mut output = String::new();
        let title = format!("Transactions by Type: {}", month_label(self.year, self.month));

        output.push_str(&format_header(&title, REPORT_WIDTH));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if self.groups.is_empty() {
            output.push_str("No transactions in this month.\n");
            return output;
        }

        output.push_str(&format!(
            "Income: {}   Expenses: {}   Net: {}\n",
            settings.format_money(self.total_income),
            settings.format_money(self.total_expenses),
            settings.format_money(self.net()),
        ));

        for group in &self.groups {
            output.push('\n');
            output.push_str(&format!(
                "{} ({} transactions)\n",
                group.transaction_type.to_string().to_uppercase(),
                group.transactions.len()
            ));
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');

            for txn in &group.transactions {
                output.push_str(&format!(
                    "  {:<12} {} {}\n",
                    txn.date.format(&settings.date_format).to_string(),
                    right_align(&settings.format_money(txn.amount), 12),
                    truncate(&txn.description, 40),
                ));
            }

            output.push_str(&format!(
                "  {:<12} {}\n",
                "Total:",
                right_align(&settings.format_money(group.total), 12)
            ));
        }

        output
    }

    /// Export the report to CSV, one row per transaction
    pub fn export_csv<W: Write>(&self, writer: W) -> PurseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Type", "Date", "Amount", "Description", "Group Total"])?;

        for group in &self.groups {
            let group_total = csv_amount(group.total);
            for txn in &group.transactions {
                csv.write_record([
                    group.transaction_type.to_string(),
                    txn.date.format(CSV_DATE_FORMAT).to_string(),
                    csv_amount(txn.amount),
                    txn.description.clone(),
                    group_total.clone(),
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
