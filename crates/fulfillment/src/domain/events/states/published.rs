//! Published state - live on the storefront.

use fulfillment_core::Event;
use uuid::Uuid;

/// A published event. No transition leads out of this state; unpublishing
/// is handled outside the engine, if at all.
#[derive(Debug, Clone)]
pub struct Published {
    pub event_id: Option<Uuid>,
    pub(crate) event: Event,
}

impl Published {
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
}
