//! Recurrence expansion
//!
//! Turns a [`RecurrenceRule`] plus the set of days that carry an exception
//! marker into the concrete occurrences overlapping a query window.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use super::advance::{first_candidate_index, occurrence_start};
use super::MAX_ITERATIONS;
use crate::models::{RecurrenceRule, VirtualOccurrence};

/// Result of expanding one rule over one window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Occurrences in chronological order
    pub occurrences: Vec<VirtualOccurrence>,
    /// The iteration cap stopped the walk before the window was exhausted
    pub truncated: bool,
}

/// Expand `rule` over `[range_start, range_end]` with the default cap
pub fn expand(
    rule: &RecurrenceRule,
    exceptions: &HashSet<NaiveDate>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Expansion {
    expand_with_cap(rule, exceptions, range_start, range_end, MAX_ITERATIONS)
}

/// Expand `rule` over `[range_start, range_end]`, visiting at most `cap`
/// candidate occurrences
///
/// Both window bounds are inclusive. An occurrence whose start day (UTC) is
/// in `exceptions` is suppressed.
pub fn expand_with_cap(
    rule: &RecurrenceRule,
    exceptions: &HashSet<NaiveDate>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    cap: u32,
) -> Expansion {
    let first = first_candidate_index(rule.start(), rule.duration(), rule.frequency(), range_start);
    let expansion = walk(rule, exceptions, range_start, range_end, cap, first);

    if expansion.truncated {
        warn!(
            event_id = %rule.event_id(),
            %range_start,
            %range_end,
            cap,
            emitted = expansion.occurrences.len(),
            "recurrence expansion hit the iteration cap; output truncated"
        );
    } else {
        debug!(
            event_id = %rule.event_id(),
            first_index = first,
            emitted = expansion.occurrences.len(),
            "expanded recurrence"
        );
    }

    expansion
}

fn walk(
    rule: &RecurrenceRule,
    exceptions: &HashSet<NaiveDate>,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    cap: u32,
    first_index: u32,
) -> Expansion {
    let duration = rule.duration();
    let limit = match rule.recurrence_end() {
        Some(end) => end.min(range_end),
        None => range_end,
    };

    let mut expansion = Expansion::default();
    let mut index = first_index;
    let mut iterations = 0u32;

    while let Some(current) = occurrence_start(rule.start(), rule.frequency(), index) {
        if current > limit {
            break;
        }
        if iterations >= cap {
            expansion.truncated = true;
            break;
        }
        iterations += 1;

        let Some(occurrence_end) = current.checked_add_signed(duration) else {
            break;
        };

        let overlaps = occurrence_end >= range_start && current <= range_end;
        if overlaps && !exceptions.contains(&current.date_naive()) {
            expansion
                .occurrences
                .push(VirtualOccurrence::new(rule.event_id(), current, occurrence_end));
        }

        match index.checked_add(1) {
            Some(next) => index = next,
            None => break,
        }
    }

    expansion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventId, Frequency};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_standup() -> RecurrenceRule {
        RecurrenceRule::new(
            EventId::new(),
            at(2025, 1, 6, 9),
            at(2025, 1, 6, 10),
            Frequency::Weekly,
            None,
        )
        .unwrap()
    }

    fn days_of(expansion: &Expansion) -> Vec<u32> {
        use chrono::Datelike;
        expansion.occurrences.iter().map(|o| o.start.day()).collect()
    }

    #[test]
    fn test_weekly_january() {
        let rule = weekly_standup();
        let result = expand(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 1, 31, 0));

        assert_eq!(days_of(&result), vec![6, 13, 20, 27]);
        assert!(!result.truncated);
        for occ in &result.occurrences {
            assert_eq!(occ.end - occ.start, Duration::hours(1));
        }
        assert_eq!(
            result.occurrences[0].virtual_id,
            format!("{}__2025-01-06", rule.event_id())
        );
    }

    #[test]
    fn test_exception_suppresses_day() {
        let rule = weekly_standup();
        let exceptions = HashSet::from([day(2025, 1, 13)]);
        let result = expand(&rule, &exceptions, at(2025, 1, 1, 0), at(2025, 1, 31, 0));

        assert_eq!(days_of(&result), vec![6, 20, 27]);
    }

    #[test]
    fn test_window_boundaries_are_inclusive() {
        let rule = weekly_standup();

        // Ends exactly at range start.
        let touching_start = expand(&rule, &HashSet::new(), at(2025, 1, 13, 10), at(2025, 1, 14, 0));
        assert_eq!(days_of(&touching_start), vec![13]);

        // Starts exactly at range end.
        let touching_end = expand(&rule, &HashSet::new(), at(2025, 1, 12, 0), at(2025, 1, 13, 9));
        assert_eq!(days_of(&touching_end), vec![13]);

        // One second short on either side.
        let gap = expand(
            &rule,
            &HashSet::new(),
            at(2025, 1, 13, 10) + Duration::seconds(1),
            at(2025, 1, 20, 9) - Duration::seconds(1),
        );
        assert!(gap.occurrences.is_empty());
    }

    #[test]
    fn test_recurrence_end_limits_series() {
        let rule = RecurrenceRule::new(
            EventId::new(),
            at(2025, 1, 1, 8),
            at(2025, 1, 1, 9),
            Frequency::Daily,
            Some(at(2025, 1, 3, 8)),
        )
        .unwrap();

        let result = expand(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 2, 1, 0));
        assert_eq!(days_of(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_monthly_month_end_policy() {
        let rule = RecurrenceRule::new(
            EventId::new(),
            at(2025, 1, 31, 18),
            at(2025, 1, 31, 19),
            Frequency::Monthly,
            None,
        )
        .unwrap();

        let result = expand(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 5, 31, 0));
        let starts: Vec<_> = result.occurrences.iter().map(|o| o.start).collect();
        assert_eq!(
            starts,
            vec![
                at(2025, 1, 31, 18),
                at(2025, 2, 28, 18),
                at(2025, 3, 31, 18),
                at(2025, 4, 30, 18),
            ]
        );
    }

    #[test]
    fn test_cap_truncates_and_flags() {
        let rule = RecurrenceRule::new(
            EventId::new(),
            at(2025, 1, 1, 8),
            at(2025, 1, 1, 9),
            Frequency::Daily,
            None,
        )
        .unwrap();

        let result = expand_with_cap(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 12, 31, 0), 10);
        assert_eq!(result.occurrences.len(), 10);
        assert!(result.truncated);

        // Exactly enough room is not truncation.
        let exact = expand_with_cap(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 1, 10, 12), 10);
        assert_eq!(exact.occurrences.len(), 10);
        assert!(!exact.truncated);
    }

    #[test]
    fn test_old_anchor_does_not_exhaust_cap() {
        // Daily since 2000: walking from the anchor would spend the whole cap
        // before reaching 2025.
        let rule = RecurrenceRule::new(
            EventId::new(),
            at(2000, 1, 1, 7),
            at(2000, 1, 1, 8),
            Frequency::Daily,
            None,
        )
        .unwrap();

        let result = expand(&rule, &HashSet::new(), at(2025, 1, 1, 0), at(2025, 1, 7, 23));
        assert_eq!(result.occurrences.len(), 7);
        assert!(!result.truncated);
        assert_eq!(result.occurrences[0].start, at(2025, 1, 1, 7));
    }

    #[test]
    fn test_long_occurrence_overlapping_window_start() {
        // A three-day block that started before the window still overlaps it.
        let rule = RecurrenceRule::new(
            EventId::new(),
            at(2025, 1, 1, 0),
            at(2025, 1, 4, 0),
            Frequency::Weekly,
            None,
        )
        .unwrap();

        let result = expand(&rule, &HashSet::new(), at(2025, 1, 10, 0), at(2025, 1, 10, 12));
        assert_eq!(days_of(&result), vec![8]);
    }

    fn frequency_strategy() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Daily),
            Just(Frequency::Weekly),
            Just(Frequency::Monthly),
            Just(Frequency::Yearly),
        ]
    }

    fn rule_strategy() -> impl Strategy<Value = RecurrenceRule> {
        (
            0i64..(3 * 365 * 24),
            1i64..(72 * 60),
            frequency_strategy(),
        )
            .prop_map(|(offset_hours, minutes, frequency)| {
                let start = at(2022, 1, 1, 0) + Duration::hours(offset_hours);
                RecurrenceRule::new(
                    EventId::new(),
                    start,
                    start + Duration::minutes(minutes),
                    frequency,
                    None,
                )
                .unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_duration_is_preserved(
            rule in rule_strategy(),
            window_offset in 0i64..(5 * 365 * 24),
            window_hours in 1i64..(120 * 24),
        ) {
            let range_start = at(2021, 1, 1, 0) + Duration::hours(window_offset);
            let range_end = range_start + Duration::hours(window_hours);
            let result = expand(&rule, &HashSet::new(), range_start, range_end);

            for occ in &result.occurrences {
                prop_assert_eq!(occ.end - occ.start, rule.duration());
                prop_assert!(occ.end >= range_start && occ.start <= range_end);
            }
            prop_assert!(result.occurrences.windows(2).all(|w| w[0].start < w[1].start));
        }

        #[test]
        fn prop_exceptions_never_appear(
            rule in rule_strategy(),
            window_offset in 0i64..(3 * 365),
            skip in proptest::collection::vec(0i64..400, 0..20),
        ) {
            let range_start = at(2022, 1, 1, 0) + Duration::days(window_offset);
            let range_end = range_start + Duration::days(400);
            let exceptions: HashSet<NaiveDate> = skip
                .iter()
                .map(|d| (range_start + Duration::days(*d)).date_naive())
                .collect();

            let result = expand(&rule, &exceptions, range_start, range_end);
            for occ in &result.occurrences {
                prop_assert!(!exceptions.contains(&occ.day()));
            }
        }

        #[test]
        fn prop_fast_forward_matches_full_walk(
            rule in rule_strategy(),
            window_offset in 0i64..(5 * 365 * 24),
            window_hours in 1i64..(60 * 24),
        ) {
            let range_start = at(2021, 1, 1, 0) + Duration::hours(window_offset);
            let range_end = range_start + Duration::hours(window_hours);

            let fast = expand(&rule, &HashSet::new(), range_start, range_end);
            let full = walk(&rule, &HashSet::new(), range_start, range_end, u32::MAX, 0);
            prop_assert_eq!(fast.occurrences, full.occurrences);
        }
    }
}
