//! JSON export

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PlannerError, PlannerResult};
use crate::services::{Agenda, MonthBudget};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper stamped around every exported document
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope<T: Serialize> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub data: T,
}

impl<T: Serialize> ExportEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            data,
        }
    }
}

fn write_pretty<W: Write, T: Serialize>(writer: &mut W, value: &T) -> PlannerResult<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| PlannerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PlannerError::Export(e.to_string()))
}

pub fn export_budget_json<W: Write>(budget: &MonthBudget, writer: &mut W) -> PlannerResult<()> {
    write_pretty(writer, &ExportEnvelope::new(budget))
}

pub fn export_agenda_json<W: Write>(agenda: &Agenda, writer: &mut W) -> PlannerResult<()> {
    write_pretty(writer, &ExportEnvelope::new(agenda))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthKey};
    use serde_json::Value;

    #[test]
    fn test_budget_json_shape() {
        let budget = MonthBudget {
            month: MonthKey::new(2025, 1).unwrap(),
            ready_to_assign: Money::from_cents(1_000),
            total_budget_balance: Money::from_cents(1_000),
            total_available: Money::zero(),
            category_groups: vec![],
        };

        let mut out = Vec::new();
        export_budget_json(&budget, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(parsed["data"]["month"], "2025-01");
        assert_eq!(parsed["data"]["ready_to_assign"], 1_000);
    }

    #[test]
    fn test_agenda_json_flag() {
        let agenda = Agenda {
            entries: vec![],
            truncated: true,
        };
        let mut out = Vec::new();
        export_agenda_json(&agenda, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["data"]["truncated"], true);
    }
}
