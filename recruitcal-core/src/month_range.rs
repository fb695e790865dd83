//! Calendar month bounds used by auto-assignment.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rand::Rng;

use crate::error::{SchedulerError, SchedulerResult};

/// Inclusive range covering one calendar month, in UTC.
/// `end` is the last millisecond of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl MonthRange {
    /// The month containing `reference`, with boundaries at local midnight in `tz`.
    pub fn containing(reference: DateTime<Utc>, tz: Tz) -> SchedulerResult<Self> {
        let local = reference.with_timezone(&tz);
        let first = first_of_month(local.year(), local.month())?;
        let next = if local.month() == 12 {
            first_of_month(local.year() + 1, 1)?
        } else {
            first_of_month(local.year(), local.month() + 1)?
        };

        let start = local_midnight(tz, first)?;
        let end = local_midnight(tz, next)? - Duration::milliseconds(1);

        Ok(MonthRange { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Draw an instant uniformly at millisecond resolution, bounds included.
    pub fn random_instant<R: Rng>(&self, rng: &mut R) -> DateTime<Utc> {
        let millis = rng.random_range(self.start.timestamp_millis()..=self.end.timestamp_millis());
        DateTime::from_timestamp_millis(millis).unwrap_or(self.start)
    }
}

fn first_of_month(year: i32, month: u32) -> SchedulerResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| SchedulerError::MonthOutOfRange(format!("{year}-{month:02}")))
}

/// Start of `date` in `tz`. Zones that skip midnight for DST start the day at 01:00.
fn local_midnight(tz: Tz, date: NaiveDate) -> SchedulerResult<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .or_else(|| {
            let one_am = date.and_hms_opt(1, 0, 0)?;
            tz.from_local_datetime(&one_am).earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            SchedulerError::MonthOutOfRange(format!("no local midnight on {date} in {}", tz.name()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn utc_month_bounds() {
        let range = MonthRange::containing(utc(2024, 3, 15, 12, 0, 0), Tz::UTC).unwrap();
        assert_eq!(range.start, utc(2024, 3, 1, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 4, 1, 0, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn december_rolls_into_next_year() {
        let range = MonthRange::containing(utc(2023, 12, 31, 23, 0, 0), Tz::UTC).unwrap();
        assert_eq!(range.start, utc(2023, 12, 1, 0, 0, 0));
        assert_eq!(range.end, utc(2024, 1, 1, 0, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn leap_february() {
        let range = MonthRange::containing(utc(2024, 2, 10, 0, 0, 0), Tz::UTC).unwrap();
        assert_eq!(range.end, utc(2024, 2, 29, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn zoned_bounds_follow_local_midnight() {
        // Paris switches to summer time on 2024-03-31.
        let range = MonthRange::containing(utc(2024, 3, 15, 12, 0, 0), Tz::Europe__Paris).unwrap();
        assert_eq!(range.start, utc(2024, 2, 29, 23, 0, 0));
        assert_eq!(range.end, utc(2024, 3, 31, 22, 0, 0) - Duration::milliseconds(1));
    }

    #[test]
    fn reference_near_boundary_uses_local_month() {
        // 23:30 UTC on March 31st is already April in Paris.
        let range = MonthRange::containing(utc(2024, 3, 31, 23, 30, 0), Tz::Europe__Paris).unwrap();
        assert_eq!(range.start, utc(2024, 3, 31, 22, 0, 0));
    }

    #[test]
    fn random_instants_stay_in_range() {
        let range = MonthRange::containing(utc(2024, 3, 15, 12, 0, 0), Tz::UTC).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert!(range.contains(range.random_instant(&mut rng)));
        }
    }
}
