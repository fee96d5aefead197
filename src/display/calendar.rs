//! Calendar display formatting

use chrono::{DateTime, Utc};

use crate::calendar::EntryKind;
use crate::models::{CalendarEvent, ExceptionMarker};
use crate::services::Agenda;

use super::column_width;

fn instant(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn recurrence(event: &CalendarEvent) -> String {
    match (event.frequency, event.recurrence_end) {
        (Some(frequency), Some(until)) => format!("{} until {}", frequency, instant(until)),
        (Some(frequency), None) => frequency.to_string(),
        (None, _) => "once".to_string(),
    }
}

/// Format an agenda window, one line per entry
pub fn format_agenda(agenda: &Agenda) -> String {
    if agenda.entries.is_empty() {
        return "Nothing scheduled.\n".to_string();
    }

    let title_width = column_width(agenda.entries.iter().map(|e| e.title.as_str()), 5);
    let mut output = String::new();
    let mut current_day = None;

    for entry in &agenda.entries {
        let day = entry.start.date_naive();
        if current_day != Some(day) {
            output.push_str(&format!("{}\n", day.format("%A, %Y-%m-%d")));
            current_day = Some(day);
        }

        let marker = match entry.kind {
            EntryKind::Single => "",
            EntryKind::Occurrence => " ↻",
            EntryKind::Override => " ↻*",
        };
        let location = if entry.location.is_empty() {
            String::new()
        } else {
            format!(" @ {}", entry.location)
        };

        output.push_str(&format!(
            "  {}-{}  {:<title_width$}{}{}\n",
            entry.start.format("%H:%M"),
            entry.end.format("%H:%M"),
            entry.title,
            marker,
            location,
        ));
    }

    if agenda.truncated {
        output.push_str("\n⚠ Some recurring events were cut short. Query a smaller window to see all of them.\n");
    }

    output
}

/// Format event masters as a table
pub fn format_event_list(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let title_width = column_width(events.iter().map(|e| e.title.as_str()), 5);
    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<title_width$}  {:<16}  {:<16}  {}\n",
        "ID", "Title", "Start", "End", "Repeats",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<title_width$}  {:-<16}  {:-<16}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for event in events {
        output.push_str(&format!(
            "{:<12}  {:<title_width$}  {:<16}  {:<16}  {}\n",
            event.id.short(),
            event.title,
            instant(event.start),
            instant(event.end),
            recurrence(event),
        ));
    }

    output
}

/// Format one event master with its exception markers
pub fn format_event_details(event: &CalendarEvent, exceptions: &[ExceptionMarker]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Event: {}\n", event.title));
    output.push_str(&format!("  ID:      {}\n", event.id));
    output.push_str(&format!("  Start:   {}\n", instant(event.start)));
    output.push_str(&format!("  End:     {}\n", instant(event.end)));
    output.push_str(&format!("  Repeats: {}\n", recurrence(event)));
    if !event.location.is_empty() {
        output.push_str(&format!("  Where:   {}\n", event.location));
    }
    if !event.description.is_empty() {
        output.push_str(&format!("  Notes:   {}\n", event.description));
    }

    if !exceptions.is_empty() {
        output.push_str("\nExceptions:\n");
        for marker in exceptions {
            match marker.override_interval() {
                Some((start, end)) => output.push_str(&format!(
                    "  {}  moved to {} .. {}{}\n",
                    marker.original_date,
                    instant(start),
                    instant(end),
                    marker
                        .override_title
                        .as_ref()
                        .map(|t| format!(" as \"{}\"", t))
                        .unwrap_or_default(),
                )),
                None => output.push_str(&format!("  {}  skipped\n", marker.original_date)),
            }
        }
    }

    output
}
