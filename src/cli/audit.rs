//! Audit log CLI command

use crate::config::Settings;
use crate::error::PlannerResult;
use crate::storage::Storage;

/// Print the user's most recent audit entries, oldest first
pub fn handle_log_command(storage: &Storage, settings: &Settings, count: usize) -> PlannerResult<()> {
    let entries = storage.audit().read_recent(settings.user_id, count)?;
    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
