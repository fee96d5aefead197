//! Agenda merge
//!
//! Combines one-off events, expanded occurrences, and override markers into
//! a single chronological list for a window.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::{CalendarEvent, EventId, ExceptionMarker, VirtualOccurrence};

/// Where an agenda entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A non-recurring event
    Single,
    /// A computed occurrence of a recurring event
    Occurrence,
    /// One occurrence moved or retitled by the user
    Override,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Occurrence => write!(f, "occurrence"),
            Self::Override => write!(f, "override"),
        }
    }
}

/// One line of an agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEntry {
    /// Event id, virtual id, or `<event id>__<original day>` for overrides
    pub id: String,
    pub event_id: EventId,
    pub title: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EntryKind,
}

impl CalendarEntry {
    fn single(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.to_string(),
            event_id: event.id,
            title: event.title.clone(),
            location: event.location.clone(),
            start: event.start,
            end: event.end,
            kind: EntryKind::Single,
        }
    }

    fn occurrence(master: &CalendarEvent, occurrence: &VirtualOccurrence) -> Self {
        Self {
            id: occurrence.virtual_id.clone(),
            event_id: master.id,
            title: master.title.clone(),
            location: master.location.clone(),
            start: occurrence.start,
            end: occurrence.end,
            kind: EntryKind::Occurrence,
        }
    }

    fn overridden(
        master: &CalendarEvent,
        marker: &ExceptionMarker,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("{}__{}", master.id, marker.original_date.format("%Y-%m-%d")),
            event_id: master.id,
            title: marker
                .override_title
                .clone()
                .unwrap_or_else(|| master.title.clone()),
            location: master.location.clone(),
            start,
            end,
            kind: EntryKind::Override,
        }
    }
}

/// Merge everything visible in `[range_start, range_end]` (inclusive)
///
/// `singles` are filtered by overlap here; `occurrences` are taken as
/// already expanded for the window. Deleted markers contribute nothing.
pub fn merge_window(
    singles: &[CalendarEvent],
    occurrences: &[(&CalendarEvent, Vec<VirtualOccurrence>)],
    overrides: &[(&CalendarEvent, &ExceptionMarker)],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Vec<CalendarEntry> {
    let mut entries: Vec<CalendarEntry> = singles
        .iter()
        .filter(|event| !event.is_recurring() && event.overlaps(range_start, range_end))
        .map(CalendarEntry::single)
        .collect();

    for (master, expanded) in occurrences {
        entries.extend(
            expanded
                .iter()
                .map(|occurrence| CalendarEntry::occurrence(master, occurrence)),
        );
    }

    for (master, marker) in overrides {
        if let Some((start, end)) = marker.override_interval() {
            if end >= range_start && start <= range_end {
                entries.push(CalendarEntry::overridden(master, marker, start, end));
            }
        }
    }

    entries.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then_with(|| a.end.cmp(&b.end))
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.id.cmp(&b.id))
    });
    entries
}
