//! Ledger transaction model
//!
//! A single movement of money on an account, optionally categorized.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CategoryId, TransactionId, UserId};
use super::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: TransactionId,
    pub owner: UserId,
    pub account_id: AccountId,

    /// Uncategorized transactions only move the account balance
    pub category_id: Option<CategoryId>,

    pub date: NaiveDate,

    /// Positive for inflow, negative for outflow
    pub amount: Money,

    #[serde(default)]
    pub payee: String,

    #[serde(default)]
    pub memo: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LedgerTransaction {
    pub fn new(owner: UserId, account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            owner,
            account_id,
            category_id: None,
            date,
            amount,
            payee: String::new(),
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn categorized(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }
}

impl fmt::Display for LedgerTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.amount)?;
        if !self.payee.is_empty() {
            write!(f, " {}", self.payee)?;
        }
        Ok(())
    }
}
