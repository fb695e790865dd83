//! Outbound interview notifications.
//!
//! Sends are fire-and-forget: the controller records the `notified` flag
//! whether or not the send succeeds, and nothing is retried.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::candidate::CandidateId;
use crate::error::SchedulerResult;
use crate::event::InterviewEvent;

/// Something that can tell a candidate about their interview.
pub trait NotificationService {
    fn send(&self, address: &str, event: &InterviewEvent) -> SchedulerResult<()>;
}

/// Records every dispatch in the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl NotificationService for LogNotifier {
    fn send(&self, address: &str, event: &InterviewEvent) -> SchedulerResult<()> {
        tracing::info!(
            to = address,
            candidate = %event.candidate_id,
            start = %event.start,
            "interview notification dispatched"
        );
        Ok(())
    }
}

/// A notification that has been handed to an [`OutboxNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub address: String,
    pub candidate_id: CandidateId,
    pub title: String,
    pub start: DateTime<Utc>,
}

/// Keeps dispatched notifications in a shared in-memory outbox.
///
/// Clones share the same outbox, so a caller can hand one clone to the
/// controller and drain the other to show what was sent.
#[derive(Debug, Clone, Default)]
pub struct OutboxNotifier {
    outbox: Rc<RefCell<Vec<SentNotification>>>,
}

impl OutboxNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentNotification> {
        self.outbox.borrow().clone()
    }

    /// Take everything sent since the last drain.
    pub fn drain(&self) -> Vec<SentNotification> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }
}

impl NotificationService for OutboxNotifier {
    fn send(&self, address: &str, event: &InterviewEvent) -> SchedulerResult<()> {
        LogNotifier.send(address, event)?;
        self.outbox.borrow_mut().push(SentNotification {
            address: address.to_string(),
            candidate_id: event.candidate_id,
            title: event.title.clone(),
            start: event.start,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::default_roster;
    use chrono::{Duration, TimeZone};

    #[test]
    fn outbox_clones_share_sent_notifications() {
        let notifier = OutboxNotifier::new();
        let handle = notifier.clone();
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let event = InterviewEvent::for_candidate(&default_roster()[0], start, Duration::hours(1));

        notifier.send(&event.email, &event).unwrap();

        let sent = handle.drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].address, "john.doe@example.com");
        assert_eq!(sent[0].start, start);
        assert!(notifier.sent().is_empty());
    }
}
