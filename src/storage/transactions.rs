//! Ledger transaction repository (transactions.json)

use chrono::NaiveDate;

use crate::error::PlannerError;
use crate::models::{AccountId, LedgerTransaction, TransactionId, UserId};

use super::table::{Record, Table};

impl Record for LedgerTransaction {
    type Key = TransactionId;

    fn key(&self) -> TransactionId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type TransactionRepository = Table<LedgerTransaction>;

impl Table<LedgerTransaction> {
    /// Transactions dated strictly before `end`, oldest first
    pub fn before(&self, owner: UserId, end: NaiveDate) -> Result<Vec<LedgerTransaction>, PlannerError> {
        let mut txns = self.select(owner, |t| t.date < end)?;
        sort_by_date(&mut txns);
        Ok(txns)
    }

    /// Transactions dated within `[start, end)`, oldest first
    pub fn between(
        &self,
        owner: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<LedgerTransaction>, PlannerError> {
        let mut txns = self.select(owner, |t| t.date >= start && t.date < end)?;
        sort_by_date(&mut txns);
        Ok(txns)
    }

    pub fn for_account(&self, owner: UserId, account: AccountId) -> Result<Vec<LedgerTransaction>, PlannerError> {
        let mut txns = self.select(owner, |t| t.account_id == account)?;
        sort_by_date(&mut txns);
        Ok(txns)
    }

}

fn sort_by_date(txns: &mut [LedgerTransaction]) {
    txns.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at)));
}
