//! Account repository (accounts.json)

use crate::error::PlannerError;
use crate::models::{Account, AccountId, UserId};

use super::table::{Record, Table};

impl Record for Account {
    type Key = AccountId;

    fn key(&self) -> AccountId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type AccountRepository = Table<Account>;

impl Table<Account> {
    /// Accounts of `owner`, active first, then by name
    pub fn list(&self, owner: UserId) -> Result<Vec<Account>, PlannerError> {
        let mut accounts = self.all(owner)?;
        accounts.sort_by(|a, b| a.archived.cmp(&b.archived).then_with(|| a.name.cmp(&b.name)));
        Ok(accounts)
    }

    /// Case-insensitive name lookup
    pub fn get_by_name(&self, owner: UserId, name: &str) -> Result<Option<Account>, PlannerError> {
        let name_lower = name.to_lowercase();
        self.find(owner, |a| a.name.to_lowercase() == name_lower)
    }

    pub fn name_exists(
        &self,
        owner: UserId,
        name: &str,
        exclude: Option<AccountId>,
    ) -> Result<bool, PlannerError> {
        Ok(self
            .get_by_name(owner, name)?
            .is_some_and(|a| Some(a.id) != exclude))
    }
}
