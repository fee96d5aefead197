//! Envelope budget calculation
//!
//! Pure functions over a [`LedgerSnapshot`]. The budget service builds the
//! snapshot from storage for one user and calls [`compute_month`].

pub mod calculator;
pub mod target;

pub use calculator::{
    category_view, compute_month, CategoryBudgetView, LedgerSnapshot, MonthComputation,
};
pub use target::{target_progress, TargetProgress};
