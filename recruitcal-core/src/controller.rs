//! Session-scoped orchestration of the candidate pool and the event store.
//!
//! The controller is the only component that touches both collections. It
//! owns them for the whole session and lends them out read-only; every
//! mutation goes through one of the `on_*` operations below, each of which
//! runs to completion before the next one is accepted.
//!
//! Creating and editing an interview share one workflow: a drop (new) or a
//! selection (edit) opens a proposal, the start can be adjusted any number of
//! times, and the proposal is then confirmed or cancelled. Nothing is stored
//! until confirmation.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::candidate::{Candidate, CandidateId};
use crate::clock::{Clock, SystemClock};
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::event::{InterviewEvent, ProposedEvent};
use crate::notify::{LogNotifier, NotificationService};
use crate::planner::AutoAssignmentPlanner;
use crate::repository::CandidateRepository;
use crate::store::EventStore;

/// Where the session is in the proposal workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// A pooled candidate was dropped onto the calendar
    ProposingNew,
    /// An existing interview was reopened for editing
    ProposingEdit,
}

#[derive(Debug)]
struct OpenProposal {
    state: SessionState,
    proposed: ProposedEvent,
}

pub struct SchedulingController {
    candidates: CandidateRepository,
    events: EventStore,
    proposal: Option<OpenProposal>,
    planner: AutoAssignmentPlanner,
    clock: Box<dyn Clock>,
    notifier: Box<dyn NotificationService>,
    rng: StdRng,
}

impl SchedulingController {
    pub fn new(candidates: CandidateRepository, duration: Duration, timezone: Tz) -> Self {
        SchedulingController {
            candidates,
            events: EventStore::new(),
            proposal: None,
            planner: AutoAssignmentPlanner::new(duration, timezone),
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Start a session from configuration: seed pool, duration, zone and seed.
    pub fn from_config(config: &SchedulerConfig) -> SchedulerResult<Self> {
        let candidates = CandidateRepository::from_seed(config.candidates.iter().cloned())?;
        let controller = Self::new(
            candidates,
            config.interview_duration()?,
            config.timezone()?,
        );

        Ok(match config.seed {
            Some(seed) => controller.with_rng(StdRng::seed_from_u64(seed)),
            None => controller,
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl NotificationService + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn candidates(&self) -> &CandidateRepository {
        &self.candidates
    }

    pub fn events(&self) -> &EventStore {
        &self.events
    }

    pub fn state(&self) -> SessionState {
        self.proposal
            .as_ref()
            .map_or(SessionState::Idle, |open| open.state)
    }

    pub fn proposal(&self) -> Option<&ProposedEvent> {
        self.proposal.as_ref().map(|open| &open.proposed)
    }

    pub fn interview_duration(&self) -> Duration {
        self.planner.duration()
    }

    pub fn timezone(&self) -> Tz {
        self.planner.timezone()
    }

    fn open(&mut self, state: SessionState, proposed: ProposedEvent) -> &ProposedEvent {
        if let Some(previous) = &self.proposal {
            tracing::debug!(
                candidate = %previous.proposed.candidate_id(),
                "discarding open proposal"
            );
        }
        tracing::debug!(candidate = %proposed.candidate_id(), ?state, "proposal opened");
        &self.proposal.insert(OpenProposal { state, proposed }).proposed
    }

    // PROPOSAL WORKFLOW:

    /// A pooled candidate was dropped onto the calendar. Proposes an
    /// interview starting now. Replaces any proposal already open.
    pub fn on_drop(&mut self, candidate: &Candidate) -> SchedulerResult<&ProposedEvent> {
        if self.events.contains(candidate.id) {
            return Err(SchedulerError::AlreadyScheduled(candidate.id));
        }
        let pooled = self
            .candidates
            .get(candidate.id)
            .ok_or(SchedulerError::CandidateNotInPool(candidate.id))?;

        let event =
            InterviewEvent::for_candidate(pooled, self.clock.now(), self.planner.duration());
        Ok(self.open(SessionState::ProposingNew, ProposedEvent::new(event)))
    }

    /// An existing interview was selected. Proposes its current slot for editing.
    pub fn on_select_event(&mut self, id: CandidateId) -> SchedulerResult<&ProposedEvent> {
        let event = self
            .events
            .get(id)
            .cloned()
            .ok_or(SchedulerError::EventNotFound(id))?;

        Ok(self.open(SessionState::ProposingEdit, ProposedEvent::new(event)))
    }

    /// Change the start of the open proposal. The store is not touched.
    pub fn on_edit_proposed_start(
        &mut self,
        start: DateTime<Utc>,
    ) -> SchedulerResult<&ProposedEvent> {
        let open = self
            .proposal
            .as_mut()
            .ok_or(SchedulerError::NoActiveProposal)?;
        open.proposed.set_start(start);
        Ok(&open.proposed)
    }

    /// Commit the open proposal.
    ///
    /// If the candidate already has an interview it is replaced in place and
    /// the pool is left alone; otherwise the interview is added and the
    /// candidate leaves the pool.
    pub fn on_confirm(&mut self) -> SchedulerResult<InterviewEvent> {
        let open = self
            .proposal
            .take()
            .ok_or(SchedulerError::NoActiveProposal)?;
        let mut event = open.proposed.into_event(self.planner.duration());
        let id = event.candidate_id;

        match self.events.get(id) {
            Some(existing) => {
                // A notification sent while the dialog was open must survive the edit.
                event.notified |= existing.notified;
                self.events.upsert(event.clone());
                tracing::info!(candidate = %id, start = %event.start, "interview rescheduled");
            }
            None => {
                self.events.upsert(event.clone());
                self.candidates.remove(id);
                tracing::info!(candidate = %id, start = %event.start, "interview scheduled");
            }
        }

        Ok(event)
    }

    /// Discard the open proposal. Returns false if none was open.
    pub fn on_cancel(&mut self) -> bool {
        let cancelled = self.proposal.take();
        if let Some(open) = &cancelled {
            tracing::debug!(candidate = %open.proposed.candidate_id(), "proposal cancelled");
        }
        cancelled.is_some()
    }

    // DIRECT GESTURES:

    /// Drag an interview to a new slot.
    pub fn on_move(
        &mut self,
        id: CandidateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulerResult<&InterviewEvent> {
        let event = self.events.move_event(id, start, end)?;
        tracing::info!(candidate = %id, %start, %end, "interview moved");
        Ok(event)
    }

    /// Stretch or shrink an interview.
    pub fn on_resize(
        &mut self,
        id: CandidateId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulerResult<&InterviewEvent> {
        let event = self.events.resize(id, start, end)?;
        tracing::info!(candidate = %id, %start, %end, "interview resized");
        Ok(event)
    }

    /// Cancel an interview and return its candidate to the end of the pool.
    ///
    /// The candidate is rebuilt from the interview's cached snapshot and keeps
    /// its `notified` flag. Returns `Ok(None)` if there was no interview.
    pub fn on_delete_event(&mut self, id: CandidateId) -> SchedulerResult<Option<Candidate>> {
        let Some(event) = self.events.get(id) else {
            tracing::debug!(candidate = %id, "no interview to delete");
            return Ok(None);
        };
        if self.candidates.contains(id) {
            return Err(SchedulerError::DuplicateCandidate(id));
        }

        let candidate = event.to_candidate();
        self.events.delete(id);
        self.candidates.add(candidate.clone())?;

        if self
            .proposal
            .as_ref()
            .is_some_and(|open| open.proposed.candidate_id() == id)
        {
            self.proposal = None;
            tracing::debug!(candidate = %id, "dropped proposal for deleted interview");
        }

        tracing::info!(candidate = %id, "interview deleted, candidate returned to pool");
        Ok(Some(candidate))
    }

    /// Send the candidate their interview details and mark them notified.
    ///
    /// The flag is set after the send has been dispatched, whatever its
    /// outcome. Returns true if the flag changed; absent or already-notified
    /// interviews are left alone and nothing is sent.
    pub fn on_notify(&mut self, id: CandidateId) -> bool {
        let Some(event) = self.events.get(id) else {
            tracing::debug!(candidate = %id, "no interview to notify");
            return false;
        };
        if event.notified {
            tracing::debug!(candidate = %id, "candidate already notified");
            return false;
        }

        if let Err(err) = self.notifier.send(&event.email, event) {
            tracing::warn!(candidate = %id, error = %err, "notification send failed");
        }

        let changed = self.events.set_notified(id);
        tracing::info!(candidate = %id, "candidate marked notified");
        changed
    }

    // AUTO-ASSIGNMENT:

    /// Place every pooled candidate at a random slot in the month containing
    /// `reference`, then empty the pool. Interviews already scheduled are kept.
    pub fn on_auto_assign(
        &mut self,
        reference: DateTime<Utc>,
    ) -> SchedulerResult<Vec<InterviewEvent>> {
        let planned = self
            .planner
            .plan_month(reference, self.candidates.list(), &mut self.rng)?;

        self.events.upsert_batch(planned.iter().cloned());
        self.candidates.clear();

        // A pending drop for a candidate that now has a slot can't be confirmed as new.
        if self.proposal.as_ref().is_some_and(|open| {
            open.state == SessionState::ProposingNew
                && planned
                    .iter()
                    .any(|e| e.candidate_id == open.proposed.candidate_id())
        }) {
            self.proposal = None;
            tracing::debug!("dropped proposal for auto-assigned candidate");
        }

        tracing::info!(count = planned.len(), "auto-assigned interviews");
        Ok(planned)
    }
}
