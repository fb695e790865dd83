//! The pool of candidates without an interview slot.

use crate::candidate::{Candidate, CandidateId};
use crate::error::{SchedulerError, SchedulerResult};

/// Ordered pool of unscheduled candidates.
///
/// Keeps seed order; candidates returned to the pool are appended. The
/// repository knows nothing about the event store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRepository {
    candidates: Vec<Candidate>,
}

impl CandidateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from seed data, rejecting duplicate ids.
    pub fn from_seed(seed: impl IntoIterator<Item = Candidate>) -> SchedulerResult<Self> {
        let mut repository = Self::new();
        for candidate in seed {
            repository.add(candidate)?;
        }
        Ok(repository)
    }

    pub fn list(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CandidateId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = CandidateId> + '_ {
        self.candidates.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Append a candidate to the end of the pool.
    pub fn add(&mut self, candidate: Candidate) -> SchedulerResult<()> {
        if self.contains(candidate.id) {
            return Err(SchedulerError::DuplicateCandidate(candidate.id));
        }
        self.candidates.push(candidate);
        Ok(())
    }

    /// Remove a candidate. Absent ids are a no-op and return `None`.
    pub fn remove(&mut self, id: CandidateId) -> Option<Candidate> {
        let index = self.candidates.iter().position(|c| c.id == id)?;
        Some(self.candidates.remove(index))
    }

    /// Empty the pool, returning everyone that was in it.
    pub fn clear(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.candidates)
    }
}
