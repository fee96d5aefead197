//! Date arithmetic for recurrence walks
//!
//! Every occurrence is computed from the anchor rather than by repeatedly
//! stepping the previous one, so month-end clamping never accumulates:
//! Jan 31 → Feb 28/29 → Mar 31 → Apr 30.

use chrono::{DateTime, Datelike, Duration, Months, Utc};

use crate::models::Frequency;

/// Start of the `n`-th occurrence (0 = the anchor itself)
///
/// Monthly and yearly steps clamp to the last valid day of the target month.
/// Returns `None` when the result falls outside chrono's representable range.
pub fn occurrence_start(anchor: DateTime<Utc>, frequency: Frequency, n: u32) -> Option<DateTime<Utc>> {
    match frequency {
        Frequency::Daily => anchor.checked_add_signed(Duration::days(i64::from(n))),
        Frequency::Weekly => anchor.checked_add_signed(Duration::weeks(i64::from(n))),
        Frequency::Monthly => anchor.checked_add_months(Months::new(n)),
        Frequency::Yearly => anchor.checked_add_months(Months::new(n.checked_mul(12)?)),
    }
}

/// First occurrence index that could still overlap a window starting at
/// `range_start`
///
/// Every index below the returned one ends strictly before `range_start`.
/// The estimate errs low, never high.
pub fn first_candidate_index(
    anchor: DateTime<Utc>,
    duration: Duration,
    frequency: Frequency,
    range_start: DateTime<Utc>,
) -> u32 {
    let Some(threshold) = range_start.checked_sub_signed(duration) else {
        return 0;
    };
    if threshold <= anchor {
        return 0;
    }

    let index = match frequency {
        Frequency::Daily | Frequency::Weekly => {
            let step_seconds = match frequency {
                Frequency::Daily => Duration::days(1).num_seconds(),
                _ => Duration::weeks(1).num_seconds(),
            };
            (threshold - anchor).num_seconds() / step_seconds
        }
        Frequency::Monthly => month_distance(anchor, threshold) - 1,
        Frequency::Yearly => i64::from(threshold.year() - anchor.year()) - 1,
    };

    u32::try_from(index.max(0)).unwrap_or(u32::MAX)
}

fn month_distance(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let years = i64::from(to.year() - from.year());
    years * 12 + i64::from(to.month()) - i64::from(from.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_and_weekly_steps() {
        let anchor = at(2025, 1, 6, 9);
        assert_eq!(occurrence_start(anchor, Frequency::Daily, 0), Some(anchor));
        assert_eq!(occurrence_start(anchor, Frequency::Daily, 3), Some(at(2025, 1, 9, 9)));
        assert_eq!(occurrence_start(anchor, Frequency::Weekly, 3), Some(at(2025, 1, 27, 9)));
    }

    #[test]
    fn test_monthly_clamps_without_drift() {
        let anchor = at(2025, 1, 31, 9);
        let starts: Vec<_> = (0..4)
            .map(|n| occurrence_start(anchor, Frequency::Monthly, n).unwrap())
            .collect();
        assert_eq!(
            starts,
            vec![at(2025, 1, 31, 9), at(2025, 2, 28, 9), at(2025, 3, 31, 9), at(2025, 4, 30, 9)]
        );

        let leap = occurrence_start(at(2024, 1, 31, 9), Frequency::Monthly, 1).unwrap();
        assert_eq!(leap, at(2024, 2, 29, 9));
    }

    #[test]
    fn test_yearly_leap_day() {
        let anchor = at(2024, 2, 29, 12);
        assert_eq!(
            occurrence_start(anchor, Frequency::Yearly, 1),
            Some(at(2025, 2, 28, 12))
        );
        assert_eq!(
            occurrence_start(anchor, Frequency::Yearly, 4),
            Some(at(2028, 2, 29, 12))
        );
    }

    #[test]
    fn test_first_candidate_index_never_overshoots() {
        let anchor = at(2000, 1, 31, 9);
        let hour = Duration::hours(1);
        let range_start = at(2025, 3, 1, 0);

        for frequency in [
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Yearly,
        ] {
            let first = first_candidate_index(anchor, hour, frequency, range_start);
            assert!(first > 0);
            let previous = occurrence_start(anchor, frequency, first - 1).unwrap();
            assert!(previous + hour < range_start, "{frequency} overshot");
        }
    }

    #[test]
    fn test_first_candidate_index_before_anchor() {
        let anchor = at(2025, 1, 6, 9);
        let index = first_candidate_index(anchor, Duration::hours(1), Frequency::Daily, at(2024, 1, 1, 0));
        assert_eq!(index, 0);
    }
}
