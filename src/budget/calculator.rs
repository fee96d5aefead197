//! Envelope budget calculator
//!
//! Pure computation over a [`LedgerSnapshot`] that has already been scoped to
//! one user. `available` rolls over: it sums every assignment up to and
//! including the month and every transaction dated before the month ends.

use serde::Serialize;

use super::target::{target_progress, TargetProgress};
use crate::models::{
    Account, AccountId, Category, CategoryId, CategoryTarget, LedgerTransaction, Money, MonthKey,
    MonthlyAssignment,
};

/// Everything the calculator reads, for a single user
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub categories: Vec<Category>,
    pub assignments: Vec<MonthlyAssignment>,
    pub transactions: Vec<LedgerTransaction>,
    pub targets: Vec<CategoryTarget>,
}

impl LedgerSnapshot {
    /// Assigned to `category` in exactly `month`
    pub fn assigned_in(&self, category: CategoryId, month: MonthKey) -> Money {
        self.assignments
            .iter()
            .filter(|a| a.category_id == category && a.month == month)
            .map(|a| a.assigned)
            .sum()
    }

    /// Assigned to `category` in every month up to and including `month`
    pub fn cumulative_assigned(&self, category: CategoryId, month: MonthKey) -> Money {
        self.assignments
            .iter()
            .filter(|a| a.category_id == category && a.month <= month)
            .map(|a| a.assigned)
            .sum()
    }

    /// Transactions in `category` dated within `month`
    pub fn activity_in(&self, category: CategoryId, month: MonthKey) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.category_id == Some(category) && month.contains(t.date))
            .map(|t| t.amount)
            .sum()
    }

    /// Transactions in `category` dated before `month` ends
    pub fn cumulative_activity(&self, category: CategoryId, month: MonthKey) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.category_id == Some(category) && month.includes_through(t.date))
            .map(|t| t.amount)
            .sum()
    }

    /// Starting balance plus every transaction on the account dated before
    /// `month` ends
    pub fn account_balance(&self, account: &Account, month: MonthKey) -> Money {
        account.starting_balance + self.account_activity(account.id, month)
    }

    fn account_activity(&self, account: AccountId, month: MonthKey) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.account_id == account && month.includes_through(t.date))
            .map(|t| t.amount)
            .sum()
    }

    /// Combined balance of on-budget, unarchived accounts at the end of `month`
    pub fn total_budget_balance(&self, month: MonthKey) -> Money {
        self.accounts
            .iter()
            .filter(|a| a.is_budget_tracked())
            .map(|a| self.account_balance(a, month))
            .sum()
    }

    pub fn target_for(&self, category: CategoryId) -> Option<&CategoryTarget> {
        self.targets.iter().find(|t| t.category_id == category)
    }
}

/// Figures for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBudgetView {
    pub category_id: CategoryId,
    pub category_name: String,
    /// Hidden categories still count toward every total
    pub hidden: bool,
    pub assigned: Money,
    /// This month only; display figure
    pub activity: Money,
    /// Cumulative, rollover-aware
    pub available: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetProgress>,
}

impl CategoryBudgetView {
    pub fn is_overspent(&self) -> bool {
        self.available.is_negative()
    }

    pub fn is_underfunded(&self) -> bool {
        self.target.as_ref().is_some_and(|t| !t.is_met())
    }
}

/// Result of computing a whole month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComputation {
    pub month: MonthKey,
    pub total_budget_balance: Money,
    pub total_available: Money,
    pub ready_to_assign: Money,
    /// One view per category, in snapshot order
    pub views: Vec<CategoryBudgetView>,
}

/// Compute the view of `category` for `month`
pub fn category_view(
    snapshot: &LedgerSnapshot,
    category: &Category,
    month: MonthKey,
) -> CategoryBudgetView {
    let assigned = snapshot.assigned_in(category.id, month);
    let activity = snapshot.activity_in(category.id, month);
    let available =
        snapshot.cumulative_assigned(category.id, month) + snapshot.cumulative_activity(category.id, month);

    let target = snapshot
        .target_for(category.id)
        .map(|t| target_progress(t, available, assigned, activity));

    CategoryBudgetView {
        category_id: category.id,
        category_name: category.name.clone(),
        hidden: category.hidden,
        assigned,
        activity,
        available,
        target,
    }
}

/// Compute every category and ready-to-assign for `month`
///
/// `ready_to_assign + total_available == total_budget_balance` always holds.
pub fn compute_month(snapshot: &LedgerSnapshot, month: MonthKey) -> MonthComputation {
    let views: Vec<CategoryBudgetView> = snapshot
        .categories
        .iter()
        .map(|c| category_view(snapshot, c, month))
        .collect();

    let total_available: Money = views.iter().map(|v| v.available).sum();
    let total_budget_balance = snapshot.total_budget_balance(month);

    MonthComputation {
        month,
        total_budget_balance,
        total_available,
        ready_to_assign: total_budget_balance - total_available,
        views,
    }
}
