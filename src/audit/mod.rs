//! Audit log
//!
//! Every create, update and delete performed by a service is appended to
//! `audit.log` as one JSON line with before/after snapshots and a short diff.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
