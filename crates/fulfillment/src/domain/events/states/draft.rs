//! Draft state - the status every event is created in.

use fulfillment_core::{Event, EventStatus};
use time::PrimitiveDateTime;
use uuid::Uuid;

use super::Published;

/// A draft event: editable, re-savable without any guard, invisible to
/// customers until published.
#[derive(Debug, Clone)]
pub struct Draft {
    pub event_id: Option<Uuid>,
    pub(crate) event: Event,
}

impl Draft {
    /// Reconstruct from an existing event loaded out of storage.
    pub fn from_event(event: Event) -> Self {
        Self {
            event_id: event.id,
            event,
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn into_event(self) -> Event {
        self.event
    }

    /// Transition to Published, stamping the resolved close instant next to
    /// the raw policy for later re-display.
    ///
    /// The transition is terminal for this engine; there is no way back to
    /// Draft. Caller must have checked readiness before calling.
    pub fn into_published(mut self, effective_close: Option<PrimitiveDateTime>) -> Published {
        self.event.status = EventStatus::Published;
        self.event.effective_close = effective_close;
        Published::from_event(self.event)
    }
}
