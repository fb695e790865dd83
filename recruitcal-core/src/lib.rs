//! Core scheduling engine for recruitcal.
//!
//! This crate keeps the pool of candidates waiting for an interview and the
//! interviews already scheduled consistent with each other:
//! - `CandidateRepository` and `EventStore` hold the two collections
//! - `AutoAssignmentPlanner` places a whole pool at random within a month
//! - `SchedulingController` runs the propose/confirm workflow and is the only
//!   thing that mutates both collections

pub mod candidate;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod month_range;
pub mod notify;
pub mod planner;
pub mod repository;
pub mod store;

pub use candidate::{Candidate, CandidateId};
pub use controller::{SchedulingController, SessionState};
pub use error::{SchedulerError, SchedulerResult};
pub use event::{InterviewEvent, ProposedEvent};
pub use repository::CandidateRepository;
pub use store::EventStore;
