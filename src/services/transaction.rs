//! Transaction service
//!
//! Adds and removes ledger transactions after checking that the account and
//! category both belong to the caller.

use chrono::NaiveDate;
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    AccountId, CategoryId, LedgerTransaction, Money, MonthKey, TransactionId, UserId,
};
use crate::storage::Storage;

/// Fields of a new transaction
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub account_id: AccountId,
    pub category_id: Option<CategoryId>,
    pub date: NaiveDate,
    pub amount: Money,
    pub payee: String,
    pub memo: String,
}

impl NewTransaction {
    pub fn new(account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            account_id,
            category_id: None,
            date,
            amount,
            payee: String::new(),
            memo: String::new(),
        }
    }
}

/// Service for the ledger
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, owner: UserId, input: NewTransaction) -> PlannerResult<LedgerTransaction> {
        if input.amount.is_zero() {
            return Err(PlannerError::Validation(
                "Transaction amount cannot be zero".into(),
            ));
        }

        let account = self
            .storage
            .accounts
            .get(owner, input.account_id)?
            .ok_or_else(|| PlannerError::account_not_found(input.account_id.to_string()))?;

        if let Some(category_id) = input.category_id {
            if self.storage.categories.get(owner, category_id)?.is_none() {
                return Err(PlannerError::category_not_found(category_id.to_string()));
            }
        }

        let mut txn = LedgerTransaction::new(owner, account.id, input.date, input.amount);
        txn.category_id = input.category_id;
        txn.payee = input.payee.trim().to_string();
        txn.memo = input.memo;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        self.storage.log_create(
            owner,
            EntityType::Transaction,
            txn.id.to_string(),
            Some(format!("{} on {}", txn, account.name)),
            &txn,
        )?;
        debug!(txn = %txn.id.short(), account = %account.id.short(), "added transaction");

        Ok(txn)
    }

    pub fn get(&self, owner: UserId, id: TransactionId) -> PlannerResult<LedgerTransaction> {
        self.storage
            .transactions
            .get(owner, id)?
            .ok_or_else(|| PlannerError::transaction_not_found(id.to_string()))
    }

    /// Find a transaction by full or short id
    pub fn find(&self, owner: UserId, identifier: &str) -> PlannerResult<LedgerTransaction> {
        self.storage
            .transactions
            .find(owner, |t| t.id.matches(identifier))?
            .ok_or_else(|| PlannerError::transaction_not_found(identifier))
    }

    pub fn list_for_account(&self, owner: UserId, account: AccountId) -> PlannerResult<Vec<LedgerTransaction>> {
        self.storage.transactions.for_account(owner, account)
    }

    pub fn list_for_month(&self, owner: UserId, month: MonthKey) -> PlannerResult<Vec<LedgerTransaction>> {
        self.storage
            .transactions
            .between(owner, month.first_day(), month.end_exclusive())
    }

    pub fn delete(&self, owner: UserId, id: TransactionId) -> PlannerResult<LedgerTransaction> {
        let txn = self
            .storage
            .transactions
            .remove(owner, id)?
            .ok_or_else(|| PlannerError::transaction_not_found(id.to_string()))?;
        self.storage.transactions.save()?;
        self.storage.log_delete(
            owner,
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.to_string()),
            &txn,
        )?;
        Ok(txn)
    }
}
