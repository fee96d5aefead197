//! Core data models
//!
//! Budgeting records (accounts, categories, assignments, transactions,
//! targets) and calendar records (events, exception markers, occurrences).
//! Every stored record carries the `owner` it belongs to.

pub mod account;
pub mod assignment;
pub mod category;
pub mod event;
pub mod ids;
pub mod money;
pub mod month;
pub mod target;
pub mod transaction;

pub use account::{Account, AccountType};
pub use assignment::MonthlyAssignment;
pub use category::{Category, CategoryGroup, CategoryValidationError};
pub use event::{
    day_key, CalendarEvent, ExceptionMarker, Frequency, RecurrenceRule, VirtualOccurrence,
};
pub use ids::{
    AccountId, CategoryGroupId, CategoryId, EventId, ExceptionId, TargetId, TransactionId, UserId,
};
pub use money::{Money, MoneyParseError};
pub use month::{MonthKey, MonthParseError};
pub use target::{CategoryTarget, RefillType, TargetType, TargetValidationError};
pub use transaction::LedgerTransaction;
