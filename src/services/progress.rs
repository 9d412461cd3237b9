use std::sync::{Mutex, PoisonError};

use crate::models::StatusEvent;

/// Receiver of live status notifications emitted while a query runs
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

/// Collects every event of one query, in emission order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<StatusEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events emitted so far
    pub fn snapshot(&self) -> Vec<StatusEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_events(self) -> Vec<StatusEvent> {
        self.events
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressSink for EventLog {
    fn emit(&self, event: StatusEvent) {
        tracing::debug!(
            level = ?event.level,
            subject = %event.subject,
            message = %event.message,
            "Status update"
        );
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
