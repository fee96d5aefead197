//! Calendar service
//!
//! Stores event masters and exception markers, and answers window queries by
//! expanding recurring masters on the fly. Occurrences are never stored.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::calendar::{self, CalendarEntry, MAX_ITERATIONS};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{
    CalendarEvent, EventId, ExceptionMarker, Frequency, RecurrenceRule, UserId, VirtualOccurrence,
};
use crate::storage::Storage;

/// Service for calendar events and their occurrences
pub struct CalendarService<'a> {
    storage: &'a Storage,
    iteration_cap: u32,
}

/// Input for a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub frequency: Option<Frequency>,
    pub recurrence_end: Option<DateTime<Utc>>,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            location: String::new(),
            start,
            end,
            frequency: None,
            recurrence_end: None,
        }
    }

    pub fn recurring(mut self, frequency: Frequency, recurrence_end: Option<DateTime<Utc>>) -> Self {
        self.frequency = Some(frequency);
        self.recurrence_end = recurrence_end;
        self
    }
}

/// Changes to an event master; `None` leaves a field as it is
///
/// `frequency` and `recurrence_end` are doubly optional so they can be
/// cleared: `Some(None)` removes the value.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub frequency: Option<Option<Frequency>>,
    pub recurrence_end: Option<Option<DateTime<Utc>>>,
}

/// Replacement values for one occurrence; unset times keep the original
#[derive(Debug, Clone, Default)]
pub struct OccurrenceEdit {
    pub title: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Everything visible in a window, sorted chronologically
#[derive(Debug, Clone, Default, Serialize)]
pub struct Agenda {
    pub entries: Vec<CalendarEntry>,
    /// Some series hit the iteration cap; narrow the window to see everything
    pub truncated: bool,
}

fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1) - Duration::nanoseconds(1))
}

impl<'a> CalendarService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            iteration_cap: MAX_ITERATIONS,
        }
    }

    /// Use a different per-series iteration cap for window queries
    pub fn with_iteration_cap(mut self, cap: u32) -> Self {
        self.iteration_cap = cap;
        self
    }

    pub fn create_event(&self, owner: UserId, input: NewEvent) -> PlannerResult<CalendarEvent> {
        let mut event = CalendarEvent::new(owner, input.title.trim(), input.start, input.end);
        event.description = input.description;
        event.location = input.location;
        event.frequency = input.frequency;
        event.recurrence_end = input.recurrence_end;
        event.validate()?;

        self.storage.events.upsert(event.clone())?;
        self.storage.events.save()?;

        self.storage.log_create(
            owner,
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &event,
        )?;
        info!(event_id = %event.id, recurring = event.is_recurring(), "created event");

        Ok(event)
    }

    pub fn get_event(&self, owner: UserId, id: EventId) -> PlannerResult<CalendarEvent> {
        self.storage
            .events
            .get(owner, id)?
            .ok_or_else(|| PlannerError::event_not_found(id.to_string()))
    }

    /// Find an event by id, short id, or exact title (case-insensitive)
    pub fn find_event(&self, owner: UserId, identifier: &str) -> PlannerResult<CalendarEvent> {
        let wanted = identifier.trim().to_lowercase();
        self.storage
            .events
            .find(owner, |e| e.id.matches(identifier) || e.title.to_lowercase() == wanted)?
            .ok_or_else(|| PlannerError::event_not_found(identifier))
    }

    pub fn list_events(&self, owner: UserId) -> PlannerResult<Vec<CalendarEvent>> {
        self.storage.events.list(owner)
    }

    /// Apply `update` to an event master
    ///
    /// Markers whose day is no longer an occurrence of the edited series are
    /// dropped; a series turned into a one-off loses all of its markers.
    pub fn update_event(
        &self,
        owner: UserId,
        id: EventId,
        update: EventUpdate,
    ) -> PlannerResult<CalendarEvent> {
        let before = self.get_event(owner, id)?;
        let mut event = before.clone();

        if let Some(title) = update.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            event.description = description;
        }
        if let Some(location) = update.location {
            event.location = location;
        }
        if let Some(start) = update.start {
            event.start = start;
        }
        if let Some(end) = update.end {
            event.end = end;
        }
        if let Some(frequency) = update.frequency {
            event.frequency = frequency;
        }
        if let Some(recurrence_end) = update.recurrence_end {
            event.recurrence_end = recurrence_end;
        }
        if event.frequency.is_none() {
            event.recurrence_end = None;
        }
        event.validate()?;
        event.updated_at = Utc::now();

        self.storage.events.upsert(event.clone())?;
        self.storage.events.save()?;

        let dropped = match RecurrenceRule::try_from(&event) {
            Ok(rule) => {
                let mut stale = HashSet::new();
                for marker in self.storage.exceptions.for_event(owner, id)? {
                    if self.occurrence_on(&rule, marker.original_date).is_none() {
                        stale.insert(marker.original_date);
                    }
                }
                self.storage
                    .exceptions
                    .remove_where(owner, |m| m.parent_event_id == id && stale.contains(&m.original_date))?
            }
            Err(_) => self.storage.exceptions.remove_for_event(owner, id)?,
        };
        if !dropped.is_empty() {
            self.storage.exceptions.save()?;
            debug!(event_id = %id, dropped = dropped.len(), "dropped stale occurrence exceptions");
        }

        self.storage.log_update(
            owner,
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &before,
            &event,
            None,
        )?;

        Ok(event)
    }

    /// Delete an event master together with its exception markers
    pub fn delete_event(&self, owner: UserId, id: EventId) -> PlannerResult<CalendarEvent> {
        let event = self
            .storage
            .events
            .remove(owner, id)?
            .ok_or_else(|| PlannerError::event_not_found(id.to_string()))?;
        let markers = self.storage.exceptions.remove_for_event(owner, id)?;

        self.storage.events.save()?;
        self.storage.exceptions.save()?;

        self.storage.log_delete(
            owner,
            EntityType::Event,
            event.id.to_string(),
            Some(event.title.clone()),
            &event,
        )?;
        info!(event_id = %id, exceptions = markers.len(), "deleted event");

        Ok(event)
    }

    /// Every event, occurrence and override overlapping `[range_start, range_end]`
    pub fn agenda(
        &self,
        owner: UserId,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> PlannerResult<Agenda> {
        if range_end < range_start {
            return Err(PlannerError::Validation(format!(
                "Window end {} is before its start {}",
                range_end, range_start
            )));
        }

        let candidates = self.storage.events.candidates(owner, range_start, range_end)?;
        let (masters, singles): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(CalendarEvent::is_recurring);

        let mut truncated = false;
        let mut marker_sets = Vec::with_capacity(masters.len());
        let mut expansions = Vec::with_capacity(masters.len());

        for master in &masters {
            let rule = RecurrenceRule::try_from(master)?;
            let markers = self.storage.exceptions.for_event(owner, master.id)?;
            let days: HashSet<NaiveDate> = markers.iter().map(|m| m.original_date).collect();

            let expansion =
                calendar::expand_with_cap(&rule, &days, range_start, range_end, self.iteration_cap);
            truncated |= expansion.truncated;

            expansions.push((master, expansion.occurrences));
            marker_sets.push(markers);
        }

        // Overrides moved outside their series' own span still show up.
        let master_ids: HashSet<EventId> = masters.iter().map(|m| m.id).collect();
        let mut moved_away = Vec::new();
        for marker in self.storage.exceptions.overriding(owner, range_start, range_end)? {
            if master_ids.contains(&marker.parent_event_id) {
                continue;
            }
            if let Some(master) = self.storage.events.get(owner, marker.parent_event_id)? {
                moved_away.push((master, marker));
            }
        }

        let overrides: Vec<(&CalendarEvent, &ExceptionMarker)> = masters
            .iter()
            .zip(&marker_sets)
            .flat_map(|(master, markers)| markers.iter().map(move |m| (master, m)))
            .chain(moved_away.iter().map(|(master, marker)| (master, marker)))
            .collect();

        let entries = calendar::merge_window(&singles, &expansions, &overrides, range_start, range_end);
        debug!(
            %range_start,
            %range_end,
            entries = entries.len(),
            truncated,
            "built agenda"
        );

        Ok(Agenda { entries, truncated })
    }

    /// Suppress the occurrence of `event` on `original_date`
    pub fn skip_occurrence(
        &self,
        owner: UserId,
        event: EventId,
        original_date: NaiveDate,
    ) -> PlannerResult<ExceptionMarker> {
        let master = self.get_event(owner, event)?;
        let rule = RecurrenceRule::try_from(&master)?;
        self.require_occurrence(&rule, original_date)?;

        let marker = ExceptionMarker::deleted(owner, master.id, original_date);
        self.put_marker(owner, &master, marker)
    }

    /// Replace the occurrence of `event` on `original_date`
    pub fn edit_occurrence(
        &self,
        owner: UserId,
        event: EventId,
        original_date: NaiveDate,
        edit: OccurrenceEdit,
    ) -> PlannerResult<ExceptionMarker> {
        let master = self.get_event(owner, event)?;
        let rule = RecurrenceRule::try_from(&master)?;
        let occurrence = self.require_occurrence(&rule, original_date)?;

        let start = edit.start.unwrap_or(occurrence.start);
        let end = edit.end.unwrap_or(occurrence.end);
        if end <= start {
            return Err(PlannerError::Validation(format!(
                "Occurrence must end after it starts ({} .. {})",
                start, end
            )));
        }
        let title = edit
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let marker = ExceptionMarker::overridden(owner, master.id, original_date, start, end, title);
        self.put_marker(owner, &master, marker)
    }

    /// Remove the marker on `original_date`, bringing the occurrence back
    pub fn restore_occurrence(
        &self,
        owner: UserId,
        event: EventId,
        original_date: NaiveDate,
    ) -> PlannerResult<ExceptionMarker> {
        let master = self.get_event(owner, event)?;
        let marker = self
            .storage
            .exceptions
            .remove(owner, (master.id, original_date))?
            .ok_or_else(|| PlannerError::exception_not_found(format!("{}__{}", master.id, original_date)))?;
        self.storage.exceptions.save()?;

        self.storage.log_delete(
            owner,
            EntityType::OccurrenceException,
            format!("{}__{}", master.id, original_date),
            Some(master.title.clone()),
            &marker,
        )?;

        Ok(marker)
    }

    pub fn exceptions(&self, owner: UserId, event: EventId) -> PlannerResult<Vec<ExceptionMarker>> {
        let master = self.get_event(owner, event)?;
        self.storage.exceptions.for_event(owner, master.id)
    }

    /// The unmodified occurrence of `rule` starting on `date`, if any
    fn occurrence_on(&self, rule: &RecurrenceRule, date: NaiveDate) -> Option<VirtualOccurrence> {
        let (day_start, day_end) = day_bounds(date);
        calendar::expand_with_cap(rule, &HashSet::new(), day_start, day_end, self.iteration_cap)
            .occurrences
            .into_iter()
            .find(|o| o.day() == date)
    }

    fn require_occurrence(&self, rule: &RecurrenceRule, date: NaiveDate) -> PlannerResult<VirtualOccurrence> {
        self.occurrence_on(rule, date).ok_or_else(|| {
            PlannerError::Validation(format!(
                "{} is not an occurrence of event {}",
                date,
                rule.event_id()
            ))
        })
    }

    /// Upsert a marker by `(event, original_date)`, keeping the first one's id
    fn put_marker(
        &self,
        owner: UserId,
        master: &CalendarEvent,
        mut marker: ExceptionMarker,
    ) -> PlannerResult<ExceptionMarker> {
        let existing = self.storage.exceptions.get(owner, marker.key())?;
        if let Some(existing) = &existing {
            marker.id = existing.id;
            marker.created_at = existing.created_at;
        }

        self.storage.exceptions.upsert(marker.clone())?;
        self.storage.exceptions.save()?;

        let entity_id = format!("{}__{}", master.id, marker.original_date);
        match existing {
            Some(before) => self.storage.log_update(
                owner,
                EntityType::OccurrenceException,
                entity_id,
                Some(master.title.clone()),
                &before,
                &marker,
                None,
            )?,
            None => self.storage.log_create(
                owner,
                EntityType::OccurrenceException,
                entity_id,
                Some(master.title.clone()),
                &marker,
            )?,
        }

        Ok(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::EntryKind;
    use crate::config::PlannerPaths;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_standup(service: &CalendarService, owner: UserId) -> CalendarEvent {
        service
            .create_event(
                owner,
                NewEvent::new("Standup", at(2025, 1, 6, 9), at(2025, 1, 6, 10))
                    .recurring(Frequency::Weekly, None),
            )
            .unwrap()
    }

    #[test]
    fn test_create_rejects_bad_events() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();

        let err = service
            .create_event(owner, NewEvent::new("Backwards", at(2025, 1, 6, 10), at(2025, 1, 6, 9)))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create_event(owner, NewEvent::new("  ", at(2025, 1, 6, 9), at(2025, 1, 6, 10)))
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service.list_events(owner).unwrap().is_empty());
    }

    #[test]
    fn test_agenda_weekly_with_skip() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        service.skip_occurrence(owner, standup.id, day(2025, 1, 13)).unwrap();

        let agenda = service.agenda(owner, at(2025, 1, 1, 0), at(2025, 1, 31, 0)).unwrap();
        let days: Vec<String> = agenda
            .entries
            .iter()
            .map(|e| e.start.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(days, vec!["2025-01-06", "2025-01-20", "2025-01-27"]);
        assert!(!agenda.truncated);
        assert_eq!(agenda.entries[0].id, format!("{}__2025-01-06", standup.id));
    }

    #[test]
    fn test_edit_occurrence_moves_it() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        let marker = service
            .edit_occurrence(
                owner,
                standup.id,
                day(2025, 1, 13),
                OccurrenceEdit {
                    start: Some(at(2025, 1, 14, 11)),
                    end: Some(at(2025, 1, 14, 12)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!marker.is_deleted);

        let agenda = service.agenda(owner, at(2025, 1, 12, 0), at(2025, 1, 19, 0)).unwrap();
        assert_eq!(agenda.entries.len(), 1);
        assert_eq!(agenda.entries[0].kind, EntryKind::Override);
        assert_eq!(agenda.entries[0].start, at(2025, 1, 14, 11));
        assert_eq!(agenda.entries[0].title, "Standup");
    }

    #[test]
    fn test_agenda_shows_occurrence_moved_past_series_end() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = service
            .create_event(
                owner,
                NewEvent::new("Standup", at(2025, 1, 6, 9), at(2025, 1, 6, 10))
                    .recurring(Frequency::Weekly, Some(at(2025, 1, 27, 9))),
            )
            .unwrap();

        service
            .edit_occurrence(
                owner,
                standup.id,
                day(2025, 1, 27),
                OccurrenceEdit {
                    start: Some(at(2025, 2, 3, 9)),
                    end: Some(at(2025, 2, 3, 10)),
                    ..Default::default()
                },
            )
            .unwrap();

        let agenda = service.agenda(owner, at(2025, 2, 1, 0), at(2025, 2, 7, 0)).unwrap();
        assert_eq!(agenda.entries.len(), 1);
        assert_eq!(agenda.entries[0].kind, EntryKind::Override);
        assert_eq!(agenda.entries[0].start, at(2025, 2, 3, 9));
        assert_eq!(agenda.entries[0].id, format!("{}__2025-01-27", standup.id));

        // The original slot is gone and the move is listed once.
        let agenda = service.agenda(owner, at(2025, 1, 20, 0), at(2025, 2, 7, 0)).unwrap();
        let starts: Vec<_> = agenda.entries.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![at(2025, 1, 20, 9), at(2025, 2, 3, 9)]);
    }

    #[test]
    fn test_agenda_shows_occurrence_moved_before_series_start() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        service
            .edit_occurrence(
                owner,
                standup.id,
                day(2025, 1, 6),
                OccurrenceEdit {
                    start: Some(at(2025, 1, 3, 9)),
                    end: Some(at(2025, 1, 3, 10)),
                    ..Default::default()
                },
            )
            .unwrap();

        let agenda = service.agenda(owner, at(2025, 1, 1, 0), at(2025, 1, 4, 0)).unwrap();
        assert_eq!(agenda.entries.len(), 1);
        assert_eq!(agenda.entries[0].start, at(2025, 1, 3, 9));

        // Another user's window stays empty.
        assert!(service
            .agenda(UserId::new(), at(2025, 1, 1, 0), at(2025, 1, 4, 0))
            .unwrap()
            .entries
            .is_empty());
    }

    #[test]
    fn test_edit_defaults_and_rejections() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        let renamed = service
            .edit_occurrence(
                owner,
                standup.id,
                day(2025, 1, 20),
                OccurrenceEdit {
                    title: Some("Retro".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(renamed.override_interval(), Some((at(2025, 1, 20, 9), at(2025, 1, 20, 10))));
        assert_eq!(renamed.override_title.as_deref(), Some("Retro"));

        // Tuesday is not a standup day.
        let err = service
            .edit_occurrence(owner, standup.id, day(2025, 1, 21), OccurrenceEdit::default())
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .edit_occurrence(
                owner,
                standup.id,
                day(2025, 1, 27),
                OccurrenceEdit {
                    end: Some(at(2025, 1, 27, 8)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_marker_upsert_and_restore() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        let first = service.skip_occurrence(owner, standup.id, day(2025, 1, 13)).unwrap();
        let second = service
            .edit_occurrence(owner, standup.id, day(2025, 1, 13), OccurrenceEdit::default())
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.exceptions(owner, standup.id).unwrap().len(), 1);

        service.restore_occurrence(owner, standup.id, day(2025, 1, 13)).unwrap();
        assert!(service.exceptions(owner, standup.id).unwrap().is_empty());

        let err = service
            .restore_occurrence(owner, standup.id, day(2025, 1, 13))
            .unwrap_err();
        assert!(err.is_not_found());

        let agenda = service.agenda(owner, at(2025, 1, 13, 0), at(2025, 1, 13, 23)).unwrap();
        assert_eq!(agenda.entries.len(), 1);
        assert_eq!(agenda.entries[0].kind, EntryKind::Occurrence);
    }

    #[test]
    fn test_update_drops_stale_markers() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);

        service.skip_occurrence(owner, standup.id, day(2025, 1, 13)).unwrap();
        service.skip_occurrence(owner, standup.id, day(2025, 1, 20)).unwrap();

        // Daily keeps both days as occurrences.
        service
            .update_event(
                owner,
                standup.id,
                EventUpdate {
                    frequency: Some(Some(Frequency::Daily)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(service.exceptions(owner, standup.id).unwrap().len(), 2);

        // Shift the anchor to Tuesdays; Monday markers no longer match.
        service
            .update_event(
                owner,
                standup.id,
                EventUpdate {
                    start: Some(at(2025, 1, 7, 9)),
                    end: Some(at(2025, 1, 7, 10)),
                    frequency: Some(Some(Frequency::Weekly)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(service.exceptions(owner, standup.id).unwrap().is_empty());
    }

    #[test]
    fn test_update_to_one_off_clears_markers() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);
        service.skip_occurrence(owner, standup.id, day(2025, 1, 6)).unwrap();

        let updated = service
            .update_event(
                owner,
                standup.id,
                EventUpdate {
                    frequency: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(!updated.is_recurring());
        assert!(service.exceptions(owner, standup.id).unwrap().is_empty());
        let agenda = service.agenda(owner, at(2025, 1, 1, 0), at(2025, 1, 31, 0)).unwrap();
        assert_eq!(agenda.entries.len(), 1);
        assert_eq!(agenda.entries[0].kind, EntryKind::Single);
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let standup = weekly_standup(&service, owner);
        service.skip_occurrence(owner, standup.id, day(2025, 1, 6)).unwrap();

        service.delete_event(owner, standup.id).unwrap();

        assert!(service.get_event(owner, standup.id).unwrap_err().is_not_found());
        assert_eq!(storage.exceptions.count(owner).unwrap(), 0);
        assert!(service.delete_event(owner, standup.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_other_users_cannot_see_or_touch() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let intruder = UserId::new();
        let standup = weekly_standup(&service, owner);

        assert!(service.get_event(intruder, standup.id).unwrap_err().is_not_found());
        assert!(service
            .skip_occurrence(intruder, standup.id, day(2025, 1, 13))
            .unwrap_err()
            .is_not_found());
        assert!(service
            .agenda(intruder, at(2025, 1, 1, 0), at(2025, 1, 31, 0))
            .unwrap()
            .entries
            .is_empty());
    }

    #[test]
    fn test_skip_on_one_off_is_invalid_rule() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CalendarService::new(&storage);
        let owner = UserId::new();
        let dentist = service
            .create_event(owner, NewEvent::new("Dentist", at(2025, 1, 14, 15), at(2025, 1, 14, 16)))
            .unwrap();

        let err = service.skip_occurrence(owner, dentist.id, day(2025, 1, 14)).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRule(_)));
    }

    #[test]
    fn test_agenda_window_checks_and_cap() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = UserId::new();
        let service = CalendarService::new(&storage).with_iteration_cap(5);
        service
            .create_event(
                owner,
                NewEvent::new("Pills", at(2025, 1, 1, 8), at(2025, 1, 1, 9))
                    .recurring(Frequency::Daily, None),
            )
            .unwrap();

        let err = service
            .agenda(owner, at(2025, 2, 1, 0), at(2025, 1, 1, 0))
            .unwrap_err();
        assert!(err.is_validation());

        let agenda = service.agenda(owner, at(2025, 1, 1, 0), at(2025, 1, 31, 0)).unwrap();
        assert!(agenda.truncated);
        assert_eq!(agenda.entries.len(), 5);
    }
}
