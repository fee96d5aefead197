//! Account model
//!
//! Accounts hold money. Budget-flagged accounts feed "ready to assign".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, UserId};
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
}

impl AccountType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "cash" => Some(Self::Cash),
            "investment" => Some(Self::Investment),
            _ => None,
        }
    }

    /// Investment accounts are tracked off-budget unless asked otherwise
    pub fn default_on_budget(&self) -> bool {
        !matches!(self, Self::Investment)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Credit => write!(f, "Credit Card"),
            Self::Cash => write!(f, "Cash"),
            Self::Investment => write!(f, "Investment"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,

    pub owner: UserId,

    pub name: String,

    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Whether balances on this account count toward the budget
    pub on_budget: bool,

    /// Archived accounts are kept for history but no longer budgeted
    #[serde(default)]
    pub archived: bool,

    /// Opening balance when the account was created
    pub starting_balance: Money,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(owner: UserId, name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            owner,
            name: name.into(),
            account_type,
            on_budget: account_type.default_on_budget(),
            archived: false,
            starting_balance: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_starting_balance(
        owner: UserId,
        name: impl Into<String>,
        account_type: AccountType,
        starting_balance: Money,
    ) -> Self {
        let mut account = Self::new(owner, name, account_type);
        account.starting_balance = starting_balance;
        account
    }

    /// Whether this account contributes to the budget balance
    pub fn is_budget_tracked(&self) -> bool {
        self.on_budget && !self.archived
    }

    pub fn validate(&self) -> Result<(), String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Account name cannot be empty".into());
        }
        if name.len() > 100 {
            return Err(format!("Account name too long ({} chars, max 100)", name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}
