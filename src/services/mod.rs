//! Service layer
//!
//! Services sit on top of the storage layer and own validation, ownership
//! checks, and audit logging. Every operation takes the acting user
//! explicitly; nothing is read from ambient state.

pub mod account;
pub mod budget;
pub mod calendar;
pub mod category;
pub mod target;
pub mod transaction;

pub use account::{AccountService, AccountSummary};
pub use budget::{parse_month, BudgetService, GroupBudget, MonthBudget};
pub use calendar::{Agenda, CalendarService, EventUpdate, NewEvent, OccurrenceEdit};
pub use category::CategoryService;
pub use target::TargetService;
pub use transaction::{NewTransaction, TransactionService};
