//! Calendar event CLI commands
//!
//! Times are read as UTC unless they carry an offset.

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_agenda, format_event_details, format_event_list};
use crate::error::PlannerResult;
use crate::models::Frequency;
use crate::services::{CalendarService, EventUpdate, NewEvent, OccurrenceEdit};
use crate::storage::Storage;

use super::{parse_date, parse_datetime};

/// Event subcommands
#[derive(Subcommand)]
pub enum EventCommands {
    /// Create an event, optionally recurring
    Add {
        /// Title
        title: String,
        /// Start (YYYY-MM-DD HH:MM)
        #[arg(short, long)]
        start: String,
        /// End (YYYY-MM-DD HH:MM)
        #[arg(short, long)]
        end: String,
        /// Repeat daily, weekly, monthly or yearly
        #[arg(short, long)]
        repeat: Option<String>,
        /// Last instant an occurrence may start at
        #[arg(short, long)]
        until: Option<String>,
        /// Location
        #[arg(short, long, default_value = "")]
        location: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List event masters
    List,
    /// Show an event with its exceptions
    Show {
        /// Event title or ID
        event: String,
    },
    /// Change an event master
    Update {
        /// Event title or ID
        event: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
        /// New frequency (daily, weekly, monthly, yearly)
        #[arg(short, long, conflicts_with = "no_repeat")]
        repeat: Option<String>,
        /// Turn the series into a one-off event
        #[arg(long)]
        no_repeat: bool,
        /// New recurrence end
        #[arg(short, long)]
        until: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Delete an event and its exceptions
    Delete {
        /// Event title or ID
        event: String,
    },
    /// Show everything scheduled in a window
    Agenda {
        /// Window start (defaults to today)
        #[arg(short, long)]
        from: Option<String>,
        /// Window end (defaults to a week after the start)
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Skip one occurrence of a recurring event
    Skip {
        /// Event title or ID
        event: String,
        /// Day of the occurrence (YYYY-MM-DD)
        date: String,
    },
    /// Move or retitle one occurrence of a recurring event
    Edit {
        /// Event title or ID
        event: String,
        /// Day of the occurrence (YYYY-MM-DD)
        date: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        start: Option<String>,
        #[arg(short, long)]
        end: Option<String>,
    },
    /// Undo a skip or edit
    Restore {
        /// Event title or ID
        event: String,
        /// Day of the occurrence (YYYY-MM-DD)
        date: String,
    },
}

/// Resolve `--from`/`--to`, defaulting to the coming week
pub(crate) fn agenda_window(
    from: Option<&str>,
    to: Option<&str>,
) -> PlannerResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = match from {
        Some(f) => parse_datetime(f)?,
        None => Local::now().date_naive().and_time(NaiveTime::MIN).and_utc(),
    };
    let end = match to {
        Some(t) => parse_datetime(t)?,
        None => start + Duration::days(7),
    };
    Ok((start, end))
}

/// Handle an event command
pub fn handle_event_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EventCommands,
) -> PlannerResult<()> {
    let service = CalendarService::new(storage).with_iteration_cap(settings.recurrence.iteration_cap);
    let owner = settings.user_id;

    match cmd {
        EventCommands::Add {
            title,
            start,
            end,
            repeat,
            until,
            location,
            description,
        } => {
            let mut input = NewEvent::new(title, parse_datetime(&start)?, parse_datetime(&end)?);
            if let Some(repeat) = repeat {
                let until = until.as_deref().map(parse_datetime).transpose()?;
                input = input.recurring(repeat.parse::<Frequency>()?, until);
            }
            input.location = location;
            input.description = description;

            let event = service.create_event(owner, input)?;
            println!("Created event: {} ({})", event.title, event.id.short());
        }

        EventCommands::List => {
            let events = service.list_events(owner)?;
            print!("{}", format_event_list(&events));
        }

        EventCommands::Show { event } => {
            let event = service.find_event(owner, &event)?;
            let exceptions = service.exceptions(owner, event.id)?;
            print!("{}", format_event_details(&event, &exceptions));
        }

        EventCommands::Update {
            event,
            title,
            start,
            end,
            repeat,
            no_repeat,
            until,
            location,
        } => {
            let event = service.find_event(owner, &event)?;
            let frequency = match (repeat, no_repeat) {
                (_, true) => Some(None),
                (Some(r), false) => Some(Some(r.parse::<Frequency>()?)),
                (None, false) => None,
            };
            let update = EventUpdate {
                title,
                description: None,
                location,
                start: start.as_deref().map(parse_datetime).transpose()?,
                end: end.as_deref().map(parse_datetime).transpose()?,
                frequency,
                recurrence_end: until
                    .as_deref()
                    .map(parse_datetime)
                    .transpose()?
                    .map(Some),
            };

            let updated = service.update_event(owner, event.id, update)?;
            println!("Updated event: {}", updated.title);
        }

        EventCommands::Delete { event } => {
            let event = service.find_event(owner, &event)?;
            let deleted = service.delete_event(owner, event.id)?;
            println!("Deleted event: {}", deleted.title);
        }

        EventCommands::Agenda { from, to } => {
            let (start, end) = agenda_window(from.as_deref(), to.as_deref())?;
            let agenda = service.agenda(owner, start, end)?;
            print!("{}", format_agenda(&agenda));
        }

        EventCommands::Skip { event, date } => {
            let event = service.find_event(owner, &event)?;
            let marker = service.skip_occurrence(owner, event.id, parse_date(&date)?)?;
            println!("Skipped {} on {}", event.title, marker.original_date);
        }

        EventCommands::Edit {
            event,
            date,
            title,
            start,
            end,
        } => {
            let event = service.find_event(owner, &event)?;
            let edit = OccurrenceEdit {
                title,
                start: start.as_deref().map(parse_datetime).transpose()?,
                end: end.as_deref().map(parse_datetime).transpose()?,
            };
            let marker = service.edit_occurrence(owner, event.id, parse_date(&date)?, edit)?;
            if let Some((start, end)) = marker.override_interval() {
                println!(
                    "Moved {} on {} to {} .. {}",
                    event.title,
                    marker.original_date,
                    start.format("%Y-%m-%d %H:%M"),
                    end.format("%Y-%m-%d %H:%M")
                );
            }
        }

        EventCommands::Restore { event, date } => {
            let event = service.find_event(owner, &event)?;
            let marker = service.restore_occurrence(owner, event.id, parse_date(&date)?)?;
            println!("Restored {} on {}", event.title, marker.original_date);
        }
    }

    Ok(())
}
