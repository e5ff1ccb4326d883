//! Reports module for purse
//!
//! Month reports built on the finance service, each renderable for the
//! terminal and exportable as CSV or JSON.

pub mod by_type;
pub mod top_expenses;

pub use by_type::MonthlyTypeReport;
pub use top_expenses::TopExpensesReport;

use chrono::NaiveDate;

use crate::models::Money;

/// Width of terminal report output
pub(crate) const REPORT_WIDTH: usize = 72;

/// Date format used in CSV exports
pub(crate) const CSV_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Human-readable month, e.g. "October 2025"
///
/// Falls back to `YYYY-MM` for months chrono cannot represent.
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", year, month))
}

/// Plain two-decimal amount for CSV cells
pub(crate) fn csv_amount(amount: Money) -> String {
    format!("{:.2}", amount.amount().round_dp(2))
}
