//! Interview events and the transient proposals they are created from.
//!
//! An event carries a snapshot of the candidate's profile taken when the
//! event was created. The snapshot is not refreshed afterwards: a candidate
//! whose profile changes keeps the old copy on their event until it is
//! deleted and scheduled again.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::candidate::{Candidate, CandidateId};

/// A scheduled interview slot for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewEvent {
    pub candidate_id: CandidateId,
    /// Display title, "First Last"
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    // Candidate snapshot
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub position: String,
    pub email: String,

    pub notified: bool,
}

impl InterviewEvent {
    /// Build an event for `candidate` starting at `start` and lasting `duration`.
    pub fn for_candidate(candidate: &Candidate, start: DateTime<Utc>, duration: Duration) -> Self {
        InterviewEvent {
            candidate_id: candidate.id,
            title: candidate.full_name(),
            start,
            end: start + duration,
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            age: candidate.age,
            position: candidate.position.clone(),
            email: candidate.email.clone(),
            notified: candidate.notified,
        }
    }

    /// Rebuild the candidate this event was created for, from the cached snapshot.
    /// The candidate inherits the event's current `notified` flag.
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            id: self.candidate_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            position: self.position.clone(),
            email: self.email.clone(),
            notified: self.notified,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for InterviewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.title, self.position)
    }
}

/// A tentative interview held while a creation or edit dialog is open.
/// Never stored until confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedEvent {
    event: InterviewEvent,
}

impl ProposedEvent {
    pub fn new(event: InterviewEvent) -> Self {
        ProposedEvent { event }
    }

    pub fn candidate_id(&self) -> CandidateId {
        self.event.candidate_id
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.event.start
    }

    /// The event as it currently stands in the dialog.
    pub fn event(&self) -> &InterviewEvent {
        &self.event
    }

    pub fn set_start(&mut self, start: DateTime<Utc>) {
        let duration = self.event.duration();
        self.event.start = start;
        self.event.end = start + duration;
    }

    /// Finalize the proposal into an event of the given duration.
    pub fn into_event(self, duration: Duration) -> InterviewEvent {
        let mut event = self.event;
        event.end = event.start + duration;
        event
    }
}
