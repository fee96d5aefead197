//! Calendar event models
//!
//! A [`CalendarEvent`] is what the user stores; a recurring one carries a
//! frequency. [`RecurrenceRule`] is the validated view the expander works on.
//! [`ExceptionMarker`]s record per-occurrence edits and deletions, and
//! [`VirtualOccurrence`]s are computed on every query and never stored.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{EventId, ExceptionId, UserId};
use crate::error::PlannerError;

/// How often a recurring event repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(PlannerError::InvalidRule(format!(
                "unknown frequency '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A stored calendar event; recurring when `frequency` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub owner: UserId,
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub location: String,

    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,

    /// Last instant an occurrence may start at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_end: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EventId::new(),
            owner,
            title: title.into(),
            description: String::new(),
            location: String::new(),
            start,
            end,
            frequency: None,
            recurrence_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn recurring(mut self, frequency: Frequency, recurrence_end: Option<DateTime<Utc>>) -> Self {
        self.frequency = Some(frequency);
        self.recurrence_end = recurrence_end;
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Closed-interval overlap with `[range_start, range_end]`
    pub fn overlaps(&self, range_start: DateTime<Utc>, range_end: DateTime<Utc>) -> bool {
        self.end >= range_start && self.start <= range_end
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::Validation("Event title cannot be empty".into()));
        }
        if self.end <= self.start {
            return Err(PlannerError::Validation(format!(
                "Event must end after it starts ({} .. {})",
                self.start, self.end
            )));
        }
        if self.is_recurring() {
            RecurrenceRule::try_from(self)?;
        }
        Ok(())
    }
}

/// A validated recurrence: anchor interval, frequency and optional end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    event_id: EventId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    frequency: Frequency,
    recurrence_end: Option<DateTime<Utc>>,
}

impl RecurrenceRule {
    /// Build a rule; a non-positive duration is rejected
    pub fn new(
        event_id: EventId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        frequency: Frequency,
        recurrence_end: Option<DateTime<Utc>>,
    ) -> Result<Self, PlannerError> {
        if end <= start {
            return Err(PlannerError::InvalidRule(format!(
                "non-positive duration for event {} ({} .. {})",
                event_id.short(),
                start,
                end
            )));
        }
        Ok(Self {
            event_id,
            start,
            end,
            frequency,
            recurrence_end,
        })
    }

    /// Build a rule from an untyped frequency name
    pub fn parse(
        event_id: EventId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        frequency: &str,
        recurrence_end: Option<DateTime<Utc>>,
    ) -> Result<Self, PlannerError> {
        let frequency = frequency.parse()?;
        Self::new(event_id, start, end, frequency, recurrence_end)
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn recurrence_end(&self) -> Option<DateTime<Utc>> {
        self.recurrence_end
    }

    /// Length every occurrence keeps
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl TryFrom<&CalendarEvent> for RecurrenceRule {
    type Error = PlannerError;

    fn try_from(event: &CalendarEvent) -> Result<Self, Self::Error> {
        let frequency = event.frequency.ok_or_else(|| {
            PlannerError::InvalidRule(format!("event {} does not recur", event.id.short()))
        })?;
        Self::new(
            event.id,
            event.start,
            event.end,
            frequency,
            event.recurrence_end,
        )
    }
}

/// A user edit or deletion of one occurrence of a recurring event
///
/// Identity is `(parent_event_id, original_date)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionMarker {
    pub id: ExceptionId,
    pub owner: UserId,
    pub parent_event_id: EventId,

    /// Calendar day (UTC) of the unmodified occurrence
    pub original_date: NaiveDate,

    /// Deleted occurrences are only suppressed; nothing replaces them
    pub is_deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_start: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_end: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExceptionMarker {
    /// Marker suppressing the occurrence on `original_date`
    pub fn deleted(owner: UserId, parent_event_id: EventId, original_date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExceptionId::new(),
            owner,
            parent_event_id,
            original_date,
            is_deleted: true,
            override_title: None,
            override_start: None,
            override_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marker replacing the occurrence on `original_date` with new times
    pub fn overridden(
        owner: UserId,
        parent_event_id: EventId,
        original_date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        title: Option<String>,
    ) -> Self {
        let mut marker = Self::deleted(owner, parent_event_id, original_date);
        marker.is_deleted = false;
        marker.override_start = Some(start);
        marker.override_end = Some(end);
        marker.override_title = title;
        marker
    }

    pub fn key(&self) -> (EventId, NaiveDate) {
        (self.parent_event_id, self.original_date)
    }

    /// The replacement interval, if this marker overrides rather than deletes
    pub fn override_interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.is_deleted {
            return None;
        }
        match (self.override_start, self.override_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// One computed occurrence of a recurring event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualOccurrence {
    pub event_id: EventId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `<event id>__<YYYY-MM-DD of start>`
    pub virtual_id: String,
}

impl VirtualOccurrence {
    pub fn new(event_id: EventId, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            event_id,
            start,
            end,
            virtual_id: format!("{}__{}", event_id, day_key(start)),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

/// ISO calendar-day key (UTC) of an instant
pub fn day_key(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!(" YEARLY ".parse::<Frequency>().unwrap(), Frequency::Yearly);

        let err = "HOURLY".parse::<Frequency>().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRule(_)));
    }

    #[test]
    fn test_rule_rejects_non_positive_duration() {
        let id = EventId::new();
        let start = at(2025, 1, 6, 9);

        let same = RecurrenceRule::new(id, start, start, Frequency::Daily, None);
        assert!(matches!(same, Err(PlannerError::InvalidRule(_))));

        let backwards = RecurrenceRule::new(id, start, at(2025, 1, 6, 8), Frequency::Daily, None);
        assert!(matches!(backwards, Err(PlannerError::InvalidRule(_))));

        let bad_freq = RecurrenceRule::parse(id, start, at(2025, 1, 6, 10), "FORTNIGHTLY", None);
        assert!(matches!(bad_freq, Err(PlannerError::InvalidRule(_))));
    }

    #[test]
    fn test_rule_from_event() {
        let owner = UserId::new();
        let one_off = CalendarEvent::new(owner, "Dentist", at(2025, 1, 6, 9), at(2025, 1, 6, 10));
        assert!(RecurrenceRule::try_from(&one_off).is_err());

        let standup = one_off.clone().recurring(Frequency::Weekly, None);
        let rule = RecurrenceRule::try_from(&standup).unwrap();
        assert_eq!(rule.duration(), Duration::hours(1));
        assert_eq!(rule.event_id(), standup.id);
    }

    #[test]
    fn test_virtual_id() {
        let id = EventId::new();
        let occ = VirtualOccurrence::new(id, at(2025, 1, 13, 9), at(2025, 1, 13, 10));
        assert_eq!(occ.virtual_id, format!("{}__2025-01-13", id));
    }

    #[test]
    fn test_override_interval() {
        let owner = UserId::new();
        let parent = EventId::new();
        let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();

        let deleted = ExceptionMarker::deleted(owner, parent, day);
        assert!(deleted.override_interval().is_none());

        let moved = ExceptionMarker::overridden(
            owner,
            parent,
            day,
            at(2025, 1, 14, 9),
            at(2025, 1, 14, 10),
            None,
        );
        assert_eq!(
            moved.override_interval(),
            Some((at(2025, 1, 14, 9), at(2025, 1, 14, 10)))
        );
    }

    #[test]
    fn test_event_validation() {
        let owner = UserId::new();
        let backwards = CalendarEvent::new(owner, "Oops", at(2025, 1, 6, 10), at(2025, 1, 6, 9));
        assert!(backwards.validate().unwrap_err().is_validation());

        let untitled = CalendarEvent::new(owner, " ", at(2025, 1, 6, 9), at(2025, 1, 6, 10));
        assert!(untitled.validate().is_err());
    }
}
