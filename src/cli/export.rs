//! Export CLI commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{
    export_agenda_csv, export_agenda_json, export_budget_csv, export_budget_json,
    export_budget_yaml, ExportFormat,
};
use crate::services::{BudgetService, CalendarService};
use crate::storage::Storage;

use super::event::agenda_window;
use super::month_or_current;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export one month's budget
    Budget {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// json, csv or yaml
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export agenda entries for a window
    Agenda {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// json or csv
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&PathBuf>) -> PlannerResult<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(|e| {
            PlannerError::Export(format!("Cannot create {}: {}", path.display(), e))
        })?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Handle an export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> PlannerResult<()> {
    let owner = settings.user_id;

    match cmd {
        ExportCommands::Budget {
            month,
            format,
            output,
        } => {
            let format: ExportFormat = format.parse()?;
            let month = month_or_current(month.as_deref())?;
            let budget = BudgetService::new(storage).compute_month(owner, month)?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Json => export_budget_json(&budget, &mut writer)?,
                ExportFormat::Csv => export_budget_csv(&budget, &mut writer)?,
                ExportFormat::Yaml => export_budget_yaml(&budget, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                eprintln!("Exported {} budget to {}", month, path.display());
            }
        }

        ExportCommands::Agenda {
            from,
            to,
            format,
            output,
        } => {
            let format: ExportFormat = format.parse()?;
            let (start, end) = agenda_window(from.as_deref(), to.as_deref())?;
            let agenda = CalendarService::new(storage)
                .with_iteration_cap(settings.recurrence.iteration_cap)
                .agenda(owner, start, end)?;

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Json => export_agenda_json(&agenda, &mut writer)?,
                ExportFormat::Csv => export_agenda_csv(&agenda, &mut writer)?,
                ExportFormat::Yaml => {
                    return Err(PlannerError::Validation(
                        "Agenda export supports json and csv".into(),
                    ))
                }
            }
            writer.flush()?;

            if let Some(path) = output {
                eprintln!("Exported {} agenda entries to {}", agenda.entries.len(), path.display());
            }
        }
    }

    Ok(())
}
