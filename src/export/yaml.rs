//! YAML export

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::export::json::ExportEnvelope;
use crate::services::MonthBudget;

/// Export one month's budget as YAML with a short comment header
pub fn export_budget_yaml<W: Write>(budget: &MonthBudget, writer: &mut W) -> PlannerResult<()> {
    let envelope = ExportEnvelope::new(budget);

    writeln!(writer, "# Planner budget export: {}", budget.month.friendly())
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", envelope.exported_at)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in minor units (cents)")
        .map_err(|e| PlannerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &envelope).map_err(|e| PlannerError::Export(e.to_string()))
}
