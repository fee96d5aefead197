//! Calendar event and exception marker repositories
//! (events.json, exceptions.json)

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::PlannerError;
use crate::models::{CalendarEvent, EventId, ExceptionMarker, UserId};

use super::table::{Record, Table};

impl Record for CalendarEvent {
    type Key = EventId;

    fn key(&self) -> EventId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

impl Record for ExceptionMarker {
    type Key = (EventId, NaiveDate);

    fn key(&self) -> (EventId, NaiveDate) {
        (self.parent_event_id, self.original_date)
    }

    fn owner(&self) -> UserId {
        self.owner
    }
}

pub type EventRepository = Table<CalendarEvent>;
pub type ExceptionRepository = Table<ExceptionMarker>;

impl Table<CalendarEvent> {
    /// Events ordered by start
    pub fn list(&self, owner: UserId) -> Result<Vec<CalendarEvent>, PlannerError> {
        let mut events = self.all(owner)?;
        events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.title.cmp(&b.title)));
        Ok(events)
    }

    /// Recurring masters that may produce occurrences up to `range_end`,
    /// plus one-off events overlapping the window
    pub fn candidates(
        &self,
        owner: UserId,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, PlannerError> {
        self.select(owner, |e| {
            if e.is_recurring() {
                e.start <= range_end
                    && e
                        .recurrence_end
                        .map_or(true, |last| last + e.duration() >= range_start)
            } else {
                e.overlaps(range_start, range_end)
            }
        })
    }
}

impl Table<ExceptionMarker> {
    pub fn for_event(&self, owner: UserId, event: EventId) -> Result<Vec<ExceptionMarker>, PlannerError> {
        let mut markers = self.select(owner, |m| m.parent_event_id == event)?;
        markers.sort_by_key(|m| m.original_date);
        Ok(markers)
    }

    /// Override markers whose replacement interval overlaps the window
    pub fn overriding(
        &self,
        owner: UserId,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<ExceptionMarker>, PlannerError> {
        self.select(owner, |m| {
            m.override_interval()
                .map_or(false, |(start, end)| end >= range_start && start <= range_end)
        })
    }

    /// Drop every marker of `event`
    pub fn remove_for_event(&self, owner: UserId, event: EventId) -> Result<Vec<ExceptionMarker>, PlannerError> {
        self.remove_where(owner, |m| m.parent_event_id == event)
    }
}
