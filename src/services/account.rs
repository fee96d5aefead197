//! Account service
//!
//! Account CRUD and balances. Balances are always computed from the starting
//! balance plus the ledger; nothing is cached.

use tracing::debug;

use crate::audit::EntityType;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Account, AccountId, AccountType, Money, MonthKey, UserId};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

/// An account with its computed balance
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    pub balance: Money,
}

impl<'a> AccountService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    ///
    /// `on_budget` defaults from the account type (credit and investment
    /// accounts are off budget unless asked otherwise).
    pub fn create(
        &self,
        owner: UserId,
        name: &str,
        account_type: AccountType,
        starting_balance: Money,
        on_budget: Option<bool>,
    ) -> PlannerResult<Account> {
        let name = name.trim();
        if self.storage.accounts.name_exists(owner, name, None)? {
            return Err(PlannerError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::with_starting_balance(owner, name, account_type, starting_balance);
        if let Some(on_budget) = on_budget {
            account.on_budget = on_budget;
        }
        account.validate().map_err(PlannerError::Validation)?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            owner,
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;
        debug!(account = %account.id.short(), "created account");

        Ok(account)
    }

    pub fn get(&self, owner: UserId, id: AccountId) -> PlannerResult<Account> {
        self.storage
            .accounts
            .get(owner, id)?
            .ok_or_else(|| PlannerError::account_not_found(id.to_string()))
    }

    /// Find an account by name or id (full or short)
    pub fn find(&self, owner: UserId, identifier: &str) -> PlannerResult<Account> {
        if let Some(account) = self.storage.accounts.get_by_name(owner, identifier)? {
            return Ok(account);
        }
        self.storage
            .accounts
            .find(owner, |a| a.id.matches(identifier))?
            .ok_or_else(|| PlannerError::account_not_found(identifier))
    }

    pub fn list(&self, owner: UserId, include_archived: bool) -> PlannerResult<Vec<Account>> {
        let accounts = self.storage.accounts.list(owner)?;
        Ok(accounts
            .into_iter()
            .filter(|a| include_archived || !a.archived)
            .collect())
    }

    /// Balance at the end of `month` (all history when `None`)
    pub fn balance(&self, owner: UserId, account: &Account, month: Option<MonthKey>) -> PlannerResult<Money> {
        let txns = self.storage.transactions.for_account(owner, account.id)?;
        let activity: Money = txns
            .iter()
            .filter(|t| month.map_or(true, |m| m.includes_through(t.date)))
            .map(|t| t.amount)
            .sum();
        Ok(account.starting_balance + activity)
    }

    pub fn list_with_balances(
        &self,
        owner: UserId,
        include_archived: bool,
        month: Option<MonthKey>,
    ) -> PlannerResult<Vec<AccountSummary>> {
        self.list(owner, include_archived)?
            .into_iter()
            .map(|account| {
                let balance = self.balance(owner, &account, month)?;
                Ok(AccountSummary { account, balance })
            })
            .collect()
    }

    /// Archive an account; its history stays but it leaves the budget
    pub fn archive(&self, owner: UserId, id: AccountId) -> PlannerResult<Account> {
        let mut account = self.get(owner, id)?;
        if account.archived {
            return Ok(account);
        }
        let before = account.clone();
        account.archived = true;
        account.updated_at = chrono::Utc::now();

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;
        self.storage.log_update(
            owner,
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &before,
            &account,
            Some("archived".into()),
        )?;

        Ok(account)
    }
}
