//! Planner - recurring calendar events and envelope budgeting
//!
//! Two pure cores sit under a small storage and service layer:
//!
//! - `calendar`: expands recurring events into virtual occurrences for a
//!   window, honoring per-occurrence exceptions, and merges them with
//!   one-off events into an agenda
//! - `budget`: computes assigned, activity, available and ready-to-assign
//!   for a month, plus target progress
//!
//! The rest of the crate is organized as:
//!
//! - `config`: paths and user settings
//! - `error`: the crate error type
//! - `models`: typed records (ids, money, month keys, events, ledger rows)
//! - `storage`: owner-scoped JSON file repositories
//! - `services`: validated operations over storage, each writing the audit log
//! - `audit`: append-only change log
//! - `cli`, `display`, `export`: the command-line surface
//! - `logging`: diagnostic `tracing` output
//!
//! # Example
//!
//! ```rust,ignore
//! use planner::config::{PlannerPaths, Settings};
//! use planner::services::BudgetService;
//! use planner::storage::Storage;
//!
//! let paths = PlannerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let month = planner::services::parse_month("2025-01")?;
//! let budget = BudgetService::new(&storage).compute_month(settings.user_id, month)?;
//! println!("{}", budget.ready_to_assign);
//! ```

pub mod audit;
pub mod budget;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PlannerError, PlannerResult};
