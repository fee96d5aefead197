//! Export
//!
//! Writes a month's budget (JSON, CSV or YAML) or an agenda window (JSON or
//! CSV) to any `Write`.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

pub use self::csv::{export_agenda_csv, export_budget_csv};
pub use json::{export_agenda_json, export_budget_json, ExportEnvelope, EXPORT_SCHEMA_VERSION};
pub use yaml::export_budget_yaml;

/// Output format for `planner export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(PlannerError::Validation(format!(
                "Unknown export format '{}'. Use json, csv or yaml",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Plain decimal with a dot, for machine-readable files
pub(crate) fn decimal(amount: crate::models::Money) -> String {
    amount.format_with("", '.')
}
