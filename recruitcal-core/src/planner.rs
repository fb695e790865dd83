//! Randomized bulk placement of pooled candidates.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rand::Rng;

use crate::candidate::Candidate;
use crate::error::SchedulerResult;
use crate::event::InterviewEvent;
use crate::month_range::MonthRange;

/// Places every candidate at a uniformly random start within a month.
///
/// Slots are drawn independently: two candidates may land on overlapping
/// times. Resolving such clashes is left to the recruiter.
#[derive(Debug, Clone, Copy)]
pub struct AutoAssignmentPlanner {
    duration: Duration,
    timezone: Tz,
}

impl AutoAssignmentPlanner {
    pub fn new(duration: Duration, timezone: Tz) -> Self {
        AutoAssignmentPlanner { duration, timezone }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Plan one event per candidate inside the month containing `reference`.
    /// Mutates nothing; the caller commits the result.
    pub fn plan_month<R: Rng>(
        &self,
        reference: DateTime<Utc>,
        candidates: &[Candidate],
        rng: &mut R,
    ) -> SchedulerResult<Vec<InterviewEvent>> {
        let month = MonthRange::containing(reference, self.timezone)?;

        let events: Vec<InterviewEvent> = candidates
            .iter()
            .map(|candidate| {
                InterviewEvent::for_candidate(candidate, month.random_instant(rng), self.duration)
            })
            .collect();

        tracing::debug!(
            count = events.len(),
            month_start = %month.start,
            month_end = %month.end,
            "planned interviews"
        );

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::default_roster;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn plans_one_event_per_candidate_within_march() {
        let planner = AutoAssignmentPlanner::new(Duration::hours(1), Tz::UTC);
        let reference = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let events = planner.plan_month(reference, &default_roster(), &mut rng).unwrap();

        assert_eq!(events.len(), 3);
        let march_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let april_start = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        for event in &events {
            assert!(event.start >= march_start);
            assert!(event.start < april_start);
            assert_eq!(event.end - event.start, Duration::hours(1));
        }
    }

    #[test]
    fn keeps_candidate_order_and_snapshot() {
        let planner = AutoAssignmentPlanner::new(Duration::minutes(30), Tz::UTC);
        let reference = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let mut roster = default_roster();
        roster[1].notified = true;

        let events = planner
            .plan_month(reference, &roster, &mut StdRng::seed_from_u64(1))
            .unwrap();

        let ids: Vec<_> = events.iter().map(|e| e.candidate_id).collect();
        let expected: Vec<_> = roster.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(events[0].title, "John Doe");
        assert!(events[1].notified);
        assert!(events.iter().all(|e| e.duration() == Duration::minutes(30)));
    }

    #[test]
    fn same_seed_same_plan() {
        let planner = AutoAssignmentPlanner::new(Duration::hours(1), Tz::UTC);
        let reference = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();

        let first = planner
            .plan_month(reference, &default_roster(), &mut StdRng::seed_from_u64(99))
            .unwrap();
        let second = planner
            .plan_month(reference, &default_roster(), &mut StdRng::seed_from_u64(99))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_pool_plans_nothing() {
        let planner = AutoAssignmentPlanner::new(Duration::hours(1), Tz::UTC);
        let reference = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let events = planner
            .plan_month(reference, &[], &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(events.is_empty());
    }
}
