//! CSV export
//!
//! One row per category (budget) or per entry (agenda). Amounts are plain
//! decimals so spreadsheets read them as numbers.

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::services::{Agenda, MonthBudget};

use super::decimal;

fn export_err(e: impl std::fmt::Display) -> PlannerError {
    PlannerError::Export(e.to_string())
}

pub fn export_budget_csv<W: Write>(budget: &MonthBudget, writer: W) -> PlannerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record([
        "Month",
        "Group",
        "Category",
        "Assigned",
        "Activity",
        "Available",
        "Target",
        "Needed",
    ])
    .map_err(export_err)?;

    let month = budget.month.to_string();
    for group in &budget.category_groups {
        for view in &group.budgets {
            let (target, needed) = match &view.target {
                Some(progress) => (decimal(progress.amount), decimal(progress.needed)),
                None => (String::new(), String::new()),
            };
            csv.write_record([
                month.as_str(),
                group.group.name.as_str(),
                view.category_name.as_str(),
                decimal(view.assigned).as_str(),
                decimal(view.activity).as_str(),
                decimal(view.available).as_str(),
                target.as_str(),
                needed.as_str(),
            ])
            .map_err(export_err)?;
        }
    }

    csv.flush().map_err(export_err)
}

pub fn export_agenda_csv<W: Write>(agenda: &Agenda, writer: W) -> PlannerResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Event", "Title", "Location", "Start", "End", "Kind"])
        .map_err(export_err)?;

    for entry in &agenda.entries {
        csv.write_record([
            entry.id.clone(),
            entry.event_id.to_string(),
            entry.title.clone(),
            entry.location.clone(),
            entry.start.to_rfc3339(),
            entry.end.to_rfc3339(),
            entry.kind.to_string(),
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)
}
