//! Recurring-event expansion
//!
//! Pure functions only: nothing here reads or writes storage. The calendar
//! service loads events and exception markers, hands them to [`expand`] and
//! [`merge_window`], and returns the result.

pub mod advance;
pub mod expand;
pub mod merge;

pub use advance::{first_candidate_index, occurrence_start};
pub use expand::{expand, expand_with_cap, Expansion};
pub use merge::{merge_window, CalendarEntry, EntryKind};

/// Most candidate occurrences visited for one rule in one query
pub const MAX_ITERATIONS: u32 = 1000;
