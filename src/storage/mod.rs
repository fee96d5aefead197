//! Storage layer
//!
//! One JSON file per repository under the data directory, written
//! atomically. Every mutation a service performs is also appended to the
//! audit log through [`Storage::log_create`], [`Storage::log_update`] and
//! [`Storage::log_delete`].

pub mod accounts;
pub mod assignments;
pub mod categories;
pub mod events;
pub mod file_io;
pub mod init;
pub mod table;
pub mod targets;
pub mod transactions;

pub use accounts::AccountRepository;
pub use assignments::AssignmentRepository;
pub use categories::{CategoryRepository, GroupRepository};
pub use events::{EventRepository, ExceptionRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::seed_default_categories;
pub use table::{Record, Table};
pub use targets::TargetRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::PlannerPaths;
use crate::error::PlannerError;
use crate::models::UserId;

/// Access to every repository plus the audit log
pub struct Storage {
    paths: PlannerPaths,
    audit: AuditLogger,
    pub accounts: AccountRepository,
    pub groups: GroupRepository,
    pub categories: CategoryRepository,
    pub assignments: AssignmentRepository,
    pub transactions: TransactionRepository,
    pub targets: TargetRepository,
    pub events: EventRepository,
    pub exceptions: ExceptionRepository,
}

impl Storage {
    pub fn new(paths: PlannerPaths) -> Result<Self, PlannerError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            accounts: Table::new(paths.accounts_file()),
            groups: Table::new(paths.groups_file()),
            categories: Table::new(paths.categories_file()),
            assignments: Table::new(paths.assignments_file()),
            transactions: Table::new(paths.transactions_file()),
            targets: Table::new(paths.targets_file()),
            events: Table::new(paths.events_file()),
            exceptions: Table::new(paths.exceptions_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &PlannerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PlannerError> {
        self.accounts.load()?;
        self.groups.load()?;
        self.categories.load()?;
        self.assignments.load()?;
        self.transactions.load()?;
        self.targets.load()?;
        self.events.load()?;
        self.exceptions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PlannerError> {
        self.accounts.save()?;
        self.groups.save()?;
        self.categories.save()?;
        self.assignments.save()?;
        self.transactions.save()?;
        self.targets.save()?;
        self.events.save()?;
        self.exceptions.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PlannerError> {
        self.audit
            .log(&AuditEntry::create(owner, entity_type, entity_id, entity_name, entity))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_update<T: Serialize>(
        &self,
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), PlannerError> {
        self.audit.log(&AuditEntry::update(
            owner,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        owner: UserId,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PlannerError> {
        self.audit
            .log(&AuditEntry::delete(owner, entity_type, entity_id, entity_name, entity))
    }
}
