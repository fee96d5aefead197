//! Category target model
//!
//! A category has at most one savings target. The refill mode decides whether
//! money rolled over from earlier months counts toward this month's target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, TargetId, UserId};
use super::money::Money;

/// The cadence a target is described in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    #[default]
    Monthly,
    Weekly,
    Yearly,
}

impl TargetType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "weekly" => Some(Self::Weekly),
            "yearly" | "annual" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// How rollover is credited against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefillType {
    /// Top the category up to the target; carryover counts
    #[default]
    Refill,
    /// Assign the full target every month regardless of carryover
    SetAside,
}

impl RefillType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "refill" => Some(Self::Refill),
            "set_aside" | "setaside" => Some(Self::SetAside),
            _ => None,
        }
    }
}

impl fmt::Display for RefillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refill => write!(f, "refill"),
            Self::SetAside => write!(f, "set aside"),
        }
    }
}

/// A savings target for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTarget {
    pub id: TargetId,
    pub owner: UserId,
    pub category_id: CategoryId,

    #[serde(rename = "type")]
    pub target_type: TargetType,

    pub amount: Money,

    /// Day of the month the money is due by
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,

    #[serde(default)]
    pub refill: RefillType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CategoryTarget {
    pub fn new(
        owner: UserId,
        category_id: CategoryId,
        target_type: TargetType,
        amount: Money,
        refill: RefillType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TargetId::new(),
            owner,
            category_id,
            target_type,
            amount,
            day_of_month: None,
            refill,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn monthly(owner: UserId, category_id: CategoryId, amount: Money) -> Self {
        Self::new(owner, category_id, TargetType::Monthly, amount, RefillType::Refill)
    }

    pub fn with_day_of_month(mut self, day: u8) -> Self {
        self.day_of_month = Some(day);
        self
    }

    pub fn validate(&self) -> Result<(), TargetValidationError> {
        if self.amount.is_negative() {
            return Err(TargetValidationError::NegativeAmount);
        }
        if self.amount.is_zero() {
            return Err(TargetValidationError::ZeroAmount);
        }
        if let Some(day) = self.day_of_month {
            if !(1..=31).contains(&day) {
                return Err(TargetValidationError::InvalidDayOfMonth(day));
            }
        }
        Ok(())
    }
}

impl fmt::Display for CategoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.target_type, self.amount, self.refill)?;
        if let Some(day) = self.day_of_month {
            write!(f, " by day {}", day)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetValidationError {
    NegativeAmount,
    ZeroAmount,
    InvalidDayOfMonth(u8),
}

impl fmt::Display for TargetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Target amount cannot be negative"),
            Self::ZeroAmount => write!(f, "Target amount must be greater than zero"),
            Self::InvalidDayOfMonth(day) => {
                write!(f, "Day of month must be between 1 and 31, got {}", day)
            }
        }
    }
}

impl std::error::Error for TargetValidationError {}
