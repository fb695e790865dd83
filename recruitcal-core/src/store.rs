//! Scheduled interview events, at most one per candidate.

use chrono::{DateTime, Utc};

use crate::candidate::CandidateId;
use crate::error::{SchedulerError, SchedulerResult};
use crate::event::InterviewEvent;

/// Ordered collection of scheduled interviews keyed by candidate id.
///
/// New events are appended; replacing an existing candidate's event keeps
/// its position so listings stay stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<InterviewEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[InterviewEvent] {
        &self.events
    }

    pub fn get(&self, id: CandidateId) -> Option<&InterviewEvent> {
        self.events.iter().find(|e| e.candidate_id == id)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.events.iter().map(|e| e.candidate_id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn position(&self, id: CandidateId) -> Option<usize> {
        self.events.iter().position(|e| e.candidate_id == id)
    }

    /// Insert or replace the event for `event.candidate_id`.
    /// Returns the replaced event when one existed.
    pub fn upsert(&mut self, event: InterviewEvent) -> Option<InterviewEvent> {
        match self.position(event.candidate_id) {
            Some(index) => Some(std::mem::replace(&mut self.events[index], event)),
            None => {
                self.events.push(event);
                None
            }
        }
    }

    /// Upsert every event of a batch, in order.
    pub fn upsert_batch(&mut self, events: impl IntoIterator<Item = InterviewEvent>) {
        for event in events {
            self.upsert(event);
        }
    }

    /// Reschedule an event, keeping the duration the caller computed.
    pub fn move_event(
        &mut self,
        id: CandidateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulerResult<&InterviewEvent> {
        self.set_times(id, start, end)
    }

    /// Change an event's bounds, typically its length.
    pub fn resize(
        &mut self,
        id: CandidateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulerResult<&InterviewEvent> {
        self.set_times(id, start, end)
    }

    fn set_times(
        &mut self,
        id: CandidateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulerResult<&InterviewEvent> {
        let index = self.position(id).ok_or(SchedulerError::EventNotFound(id))?;
        if end <= start {
            return Err(SchedulerError::InvalidTimeRange { start, end });
        }

        let event = &mut self.events[index];
        event.start = start;
        event.end = end;
        Ok(&*event)
    }

    /// Remove the event for a candidate. Returns `None` if there was none.
    pub fn delete(&mut self, id: CandidateId) -> Option<InterviewEvent> {
        let index = self.position(id)?;
        Some(self.events.remove(index))
    }

    /// Mark the candidate's event as notified.
    /// Returns true only if the flag changed.
    pub fn set_notified(&mut self, id: CandidateId) -> bool {
        match self.events.iter_mut().find(|e| e.candidate_id == id) {
            Some(event) if !event.notified => {
                event.notified = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::default_roster;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn seeded_store() -> EventStore {
        let mut store = EventStore::new();
        for (i, candidate) in default_roster().iter().enumerate() {
            store.upsert(InterviewEvent::for_candidate(
                candidate,
                at(10 + i as u32, 9),
                Duration::hours(1),
            ));
        }
        store
    }

    fn order(store: &EventStore) -> Vec<u64> {
        store.ids().map(|id| id.0).collect()
    }

    #[test]
    fn upsert_appends_new_candidates() {
        let store = seeded_store();
        assert_eq!(order(&store), vec![1, 2, 3]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = seeded_store();
        let jane = &default_roster()[1];
        let replacement = InterviewEvent::for_candidate(jane, at(20, 15), Duration::hours(1));

        let previous = store.upsert(replacement).unwrap();
        assert_eq!(previous.start, at(11, 9));
        assert_eq!(order(&store), vec![1, 2, 3]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(CandidateId(2)).unwrap().start, at(20, 15));
    }

    #[test]
    fn move_event_changes_only_times() {
        let mut store = seeded_store();
        let before = store.get(CandidateId(1)).unwrap().clone();

        let moved = store.move_event(CandidateId(1), at(25, 13), at(25, 14)).unwrap();
        assert_eq!(moved.start, at(25, 13));
        assert_eq!(moved.end, at(25, 14));
        assert_eq!(moved.title, before.title);
        assert_eq!(moved.email, before.email);
        assert_eq!(moved.notified, before.notified);
    }

    #[test]
    fn resize_accepts_explicit_end() {
        let mut store = seeded_store();
        let resized = store.resize(CandidateId(3), at(12, 9), at(12, 11)).unwrap();
        assert_eq!(resized.duration(), Duration::hours(2));
    }

    #[test]
    fn move_missing_event_fails() {
        let mut store = seeded_store();
        let err = store.move_event(CandidateId(9), at(1, 9), at(1, 10)).unwrap_err();
        assert!(matches!(err, SchedulerError::EventNotFound(CandidateId(9))));
    }

    #[test]
    fn move_rejects_inverted_range() {
        let mut store = seeded_store();
        let before = store.clone();
        let err = store.move_event(CandidateId(1), at(5, 10), at(5, 10)).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidTimeRange { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn delete_returns_removed_event() {
        let mut store = seeded_store();
        let removed = store.delete(CandidateId(2)).unwrap();
        assert_eq!(removed.title, "Jane Smith");
        assert_eq!(order(&store), vec![1, 3]);
        assert!(store.delete(CandidateId(2)).is_none());
    }

    #[test]
    fn set_notified_is_idempotent() {
        let mut store = seeded_store();
        assert!(store.set_notified(CandidateId(1)));
        let after_first = store.clone();

        assert!(!store.set_notified(CandidateId(1)));
        assert_eq!(store, after_first);
        assert!(store.get(CandidateId(1)).unwrap().notified);
    }

    #[test]
    fn set_notified_on_missing_event_is_noop() {
        let mut store = seeded_store();
        let before = store.clone();
        assert!(!store.set_notified(CandidateId(99)));
        assert_eq!(store, before);
    }
}
