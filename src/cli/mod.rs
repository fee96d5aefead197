//! CLI command handlers
//!
//! Each submodule owns one clap subcommand enum and its handler. Handlers
//! act as the user recorded in settings and print through `display`.

pub mod account;
pub mod audit;
pub mod budget;
pub mod category;
pub mod event;
pub mod export;
pub mod target;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use audit::handle_log_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use event::{handle_event_command, EventCommands};
pub use export::{handle_export_command, ExportCommands};
pub use target::{handle_target_command, TargetCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Money, MonthKey};
use crate::services::parse_month;

/// Parse an amount like "100", "-30.5" or "€70,00"
pub fn parse_money(s: &str) -> PlannerResult<Money> {
    Money::parse(s).map_err(|e| {
        PlannerError::Validation(format!(
            "Invalid amount '{}'. Use a format like '100' or '100.00': {}",
            s, e
        ))
    })
}

/// Parse `--month`, defaulting to the current month
pub fn month_or_current(month: Option<&str>) -> PlannerResult<MonthKey> {
    match month {
        Some(m) => parse_month(m),
        None => Ok(MonthKey::current()),
    }
}

/// Parse a calendar date (`YYYY-MM-DD`)
pub fn parse_date(s: &str) -> PlannerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| PlannerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s)))
}

/// Parse an instant; input without an offset is taken as UTC
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]`, and a
/// bare date (midnight).
pub fn parse_datetime(s: &str) -> PlannerResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(PlannerError::Validation(format!(
        "Invalid date/time '{}'. Use YYYY-MM-DD HH:MM (UTC) or RFC 3339",
        s
    )))
}
