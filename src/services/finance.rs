//! Finance reporting service
//!
//! Stateless queries over a [`FinanceRepository`]: a month's transactions
//! grouped by type, and the largest expenses of each wallet in a month.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::PurseResult;
use crate::models::{Money, Transaction, TransactionType, Wallet, WalletId};
use crate::storage::FinanceRepository;

/// Maximum number of expenses reported per wallet
pub const TOP_EXPENSE_LIMIT: usize = 3;

/// Transactions of one type, in date order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionGroup {
    pub transaction_type: TransactionType,
    pub transactions: Vec<Transaction>,
    /// Sum of the group's amounts
    pub total: Money,
}

/// The largest expenses of a single wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletExpenses {
    pub wallet_id: WalletId,
    pub wallet_name: String,
    /// Largest first, at most [`TOP_EXPENSE_LIMIT`] entries
    pub expenses: Vec<Transaction>,
}

/// Per-wallet top expenses, in repository wallet order
///
/// Every wallet appears, even with no qualifying expenses. Entries are keyed
/// by wallet ID, so wallets sharing a display name stay distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopExpenses {
    wallets: Vec<WalletExpenses>,
}

impl TopExpenses {
    pub fn wallets(&self) -> &[WalletExpenses] {
        &self.wallets
    }

    pub fn get(&self, wallet_id: WalletId) -> Option<&WalletExpenses> {
        self.wallets.iter().find(|w| w.wallet_id == wallet_id)
    }

    /// Name-keyed view of the report
    ///
    /// When two wallets share a name, the later wallet's entry wins.
    pub fn by_name(&self) -> HashMap<String, Vec<Transaction>> {
        self.wallets
            .iter()
            .map(|w| (w.wallet_name.clone(), w.expenses.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.wallets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

/// Service for month reports
pub struct FinanceService<'a, R: FinanceRepository + ?Sized> {
    repository: &'a R,
}

impl<'a, R: FinanceRepository + ?Sized> FinanceService<'a, R> {
    /// Create a new finance service
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// The month's transactions grouped by type
    ///
    /// Groups are ordered by total, largest first; transactions inside a group
    /// are ordered by date, oldest first. An empty month yields no groups. The
    /// relative order of groups with equal totals is not part of the contract.
    pub fn group_by_type_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> PurseResult<Vec<TransactionGroup>> {
        let transactions = self.repository.get_transactions_by_month(year, month)?;
        let groups = group_by_type(
            transactions
                .into_iter()
                .filter(|t| t.is_in_month(year, month)),
        );

        tracing::debug!(year, month, groups = groups.len(), "grouped transactions by type");
        Ok(groups)
    }

    /// Up to three largest expenses of every wallet in the month
    pub fn top_expenses_per_wallet(&self, year: i32, month: u32) -> PurseResult<TopExpenses> {
        let wallets = self.repository.get_all_wallets()?;

        let report = TopExpenses {
            wallets: wallets
                .iter()
                .map(|wallet| WalletExpenses {
                    wallet_id: wallet.id,
                    wallet_name: wallet.name.clone(),
                    expenses: largest_expenses(wallet, year, month, TOP_EXPENSE_LIMIT),
                })
                .collect(),
        };

        tracing::debug!(year, month, wallets = report.len(), "selected top expenses");
        Ok(report)
    }
}

/// Partition by type, sort each partition by date, then order partitions by
/// total descending
///
/// Both sorts are stable: equal dates keep input order, and equal totals keep
/// the order in which each type was first seen.
pub fn group_by_type<I>(transactions: I) -> Vec<TransactionGroup>
where
    I: IntoIterator<Item = Transaction>,
{
    let mut groups: Vec<TransactionGroup> = Vec::with_capacity(2);

    for txn in transactions {
        match groups
            .iter_mut()
            .find(|g| g.transaction_type == txn.transaction_type)
        {
            Some(group) => {
                group.total += txn.amount;
                group.transactions.push(txn);
            }
            None => groups.push(TransactionGroup {
                transaction_type: txn.transaction_type,
                total: txn.amount,
                transactions: vec![txn],
            }),
        }
    }

    for group in &mut groups {
        group.transactions.sort_by_key(|t| t.date);
    }
    groups.sort_by(|a, b| b.total.cmp(&a.total));

    groups
}

/// A wallet's expenses in the month, largest first, at most `limit`
///
/// Equal amounts keep the wallet's insertion order.
pub fn largest_expenses(wallet: &Wallet, year: i32, month: u32, limit: usize) -> Vec<Transaction> {
    let mut expenses: Vec<Transaction> = wallet
        .transactions()
        .iter()
        .filter(|t| t.is_expense() && t.is_in_month(year, month))
        .cloned()
        .collect();

    expenses.sort_by(|a, b| b.amount.cmp(&a.amount));
    expenses.truncate(limit);
    expenses
}
