//! Budget service
//!
//! Loads one user's ledger into a [`LedgerSnapshot`] and runs the envelope
//! calculator over it. The only mutation is [`BudgetService::set_assigned`]
//! (and `move_between_categories`, which writes two rows in one save).

use serde::Serialize;
use tracing::debug;

use crate::audit::EntityType;
use crate::budget::{self, CategoryBudgetView, LedgerSnapshot};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    Category, CategoryGroup, CategoryId, Money, MonthKey, MonthlyAssignment, UserId,
};
use crate::storage::Storage;

/// Service for budget figures and assignments
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// One group's categories for a month
#[derive(Debug, Clone, Serialize)]
pub struct GroupBudget {
    pub group: CategoryGroup,
    pub budgets: Vec<CategoryBudgetView>,
}

/// The whole budget for a month
#[derive(Debug, Clone, Serialize)]
pub struct MonthBudget {
    pub month: MonthKey,
    pub ready_to_assign: Money,
    pub total_budget_balance: Money,
    pub total_available: Money,
    pub category_groups: Vec<GroupBudget>,
}

/// Parse a month key typed by a user; malformed keys are validation errors
pub fn parse_month(s: &str) -> PlannerResult<MonthKey> {
    Ok(MonthKey::parse(s)?)
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Everything the calculator needs for `owner` up to the end of `month`
    pub fn snapshot(&self, owner: UserId, month: MonthKey) -> PlannerResult<LedgerSnapshot> {
        Ok(LedgerSnapshot {
            accounts: self.storage.accounts.all(owner)?,
            categories: self.storage.categories.list(owner)?,
            assignments: self.storage.assignments.through(owner, month)?,
            transactions: self.storage.transactions.before(owner, month.end_exclusive())?,
            targets: self.storage.targets.all(owner)?,
        })
    }

    fn owned_category(&self, owner: UserId, id: CategoryId) -> PlannerResult<Category> {
        self.storage
            .categories
            .get(owner, id)?
            .ok_or_else(|| PlannerError::category_not_found(id.to_string()))
    }

    pub fn compute_month(&self, owner: UserId, month: MonthKey) -> PlannerResult<MonthBudget> {
        let snapshot = self.snapshot(owner, month)?;
        let computed = budget::compute_month(&snapshot, month);

        let groups = self.storage.groups.list(owner)?;
        let category_groups = groups
            .into_iter()
            .map(|group| {
                let budgets = snapshot
                    .categories
                    .iter()
                    .zip(&computed.views)
                    .filter(|(category, _)| category.group_id == group.id)
                    .map(|(_, view)| view.clone())
                    .collect();
                GroupBudget { group, budgets }
            })
            .collect();

        debug!(
            %month,
            ready_to_assign = computed.ready_to_assign.cents(),
            categories = computed.views.len(),
            "computed month"
        );

        Ok(MonthBudget {
            month,
            ready_to_assign: computed.ready_to_assign,
            total_budget_balance: computed.total_budget_balance,
            total_available: computed.total_available,
            category_groups,
        })
    }

    pub fn ready_to_assign(&self, owner: UserId, month: MonthKey) -> PlannerResult<Money> {
        let snapshot = self.snapshot(owner, month)?;
        Ok(budget::compute_month(&snapshot, month).ready_to_assign)
    }

    pub fn category_view(
        &self,
        owner: UserId,
        category: CategoryId,
        month: MonthKey,
    ) -> PlannerResult<CategoryBudgetView> {
        let category = self.owned_category(owner, category)?;
        let snapshot = self.snapshot(owner, month)?;
        Ok(budget::category_view(&snapshot, &category, month))
    }

    /// Set the amount assigned to `category` in `month`
    ///
    /// Replaces any previous value for the same (category, month); calling it
    /// twice with the same amount is the same as calling it once.
    pub fn set_assigned(
        &self,
        owner: UserId,
        category: CategoryId,
        month: MonthKey,
        amount: Money,
    ) -> PlannerResult<MonthlyAssignment> {
        if amount.is_negative() {
            return Err(PlannerError::Validation(format!(
                "Assigned amount cannot be negative: {}",
                amount
            )));
        }
        let category = self.owned_category(owner, category)?;

        let (assignment, before) = self.stage_assignment(owner, &category, month, amount)?;
        self.storage.assignments.save()?;
        self.log_assignment(owner, &category, &assignment, before)?;

        Ok(assignment)
    }

    /// Upsert a row in memory, returning it and the row it replaced
    fn stage_assignment(
        &self,
        owner: UserId,
        category: &Category,
        month: MonthKey,
        amount: Money,
    ) -> PlannerResult<(MonthlyAssignment, Option<MonthlyAssignment>)> {
        let assignment = MonthlyAssignment::new(owner, category.id, month, amount);
        let before = self.storage.assignments.upsert(assignment.clone())?;
        Ok((assignment, before))
    }

    /// Put back the row a staged upsert replaced
    fn unstage_assignment(
        &self,
        owner: UserId,
        category: CategoryId,
        month: MonthKey,
        before: Option<MonthlyAssignment>,
    ) -> PlannerResult<()> {
        match before {
            Some(row) => {
                self.storage.assignments.upsert(row)?;
            }
            None => {
                self.storage.assignments.remove(owner, (category, month))?;
            }
        }
        Ok(())
    }

    fn log_assignment(
        &self,
        owner: UserId,
        category: &Category,
        assignment: &MonthlyAssignment,
        before: Option<MonthlyAssignment>,
    ) -> PlannerResult<()> {
        let entity_id = format!("{}:{}", category.id, assignment.month);
        match before {
            Some(before) if before.assigned == assignment.assigned => Ok(()),
            Some(before) => self.storage.log_update(
                owner,
                EntityType::Assignment,
                entity_id,
                Some(category.name.clone()),
                &before,
                assignment,
                Some(format!("assigned: {} -> {}", before.assigned, assignment.assigned)),
            ),
            None => self.storage.log_create(
                owner,
                EntityType::Assignment,
                entity_id,
                Some(category.name.clone()),
                assignment,
            ),
        }
    }

    /// Move assigned money from one category to another within `month`
    pub fn move_between_categories(
        &self,
        owner: UserId,
        from: CategoryId,
        to: CategoryId,
        month: MonthKey,
        amount: Money,
    ) -> PlannerResult<()> {
        if !amount.is_positive() {
            return Err(PlannerError::Validation(
                "Amount to move must be positive".into(),
            ));
        }
        if from == to {
            return Err(PlannerError::Validation(
                "Cannot move money to the same category".into(),
            ));
        }

        let from_category = self.owned_category(owner, from)?;
        let to_category = self.owned_category(owner, to)?;

        let from_assigned = self.assigned(owner, from, month)?;
        if from_assigned < amount {
            return Err(PlannerError::InsufficientFunds {
                category: from_category.name,
                needed: amount.cents(),
                available: from_assigned.cents(),
            });
        }
        let to_assigned = self.assigned(owner, to_category.id, month)?;

        // Both rows go to disk in one save, or neither changes.
        let (from_row, from_before) =
            self.stage_assignment(owner, &from_category, month, from_assigned - amount)?;
        let (to_row, to_before) =
            match self.stage_assignment(owner, &to_category, month, to_assigned + amount) {
                Ok(staged) => staged,
                Err(e) => {
                    self.unstage_assignment(owner, from, month, from_before)?;
                    return Err(e);
                }
            };
        if let Err(e) = self.storage.assignments.save() {
            self.unstage_assignment(owner, to_category.id, month, to_before)?;
            self.unstage_assignment(owner, from, month, from_before)?;
            return Err(e);
        }

        self.log_assignment(owner, &from_category, &from_row, from_before)?;
        self.log_assignment(owner, &to_category, &to_row, to_before)?;
        Ok(())
    }

    /// Assigned to `category` in exactly `month` (zero when unset)
    pub fn assigned(&self, owner: UserId, category: CategoryId, month: MonthKey) -> PlannerResult<Money> {
        Ok(self
            .storage
            .assignments
            .get(owner, (category, month))?
            .map(|a| a.assigned)
            .unwrap_or_default())
    }

    /// Categories whose available balance is negative
    pub fn overspent_categories(&self, owner: UserId, month: MonthKey) -> PlannerResult<Vec<CategoryBudgetView>> {
        let snapshot = self.snapshot(owner, month)?;
        Ok(budget::compute_month(&snapshot, month)
            .views
            .into_iter()
            .filter(CategoryBudgetView::is_overspent)
            .collect())
    }

    /// Categories that still need money this month to meet their target
    pub fn underfunded_categories(&self, owner: UserId, month: MonthKey) -> PlannerResult<Vec<CategoryBudgetView>> {
        let snapshot = self.snapshot(owner, month)?;
        Ok(budget::compute_month(&snapshot, month)
            .views
            .into_iter()
            .filter(CategoryBudgetView::is_underfunded)
            .collect())
    }
}
