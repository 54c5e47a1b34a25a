//! Typestate machine for the event publishing lifecycle.
//!
//! Each status is a separate struct; the draft-to-published transition
//! consumes the draft and returns the published state, so a backward
//! transition cannot be expressed. Unpublishing is not modeled here.
//!
//! # State Flow
//!
//! ```text
//! Draft ──(readiness satisfied)──→ Published
//!   ↺ re-save, always allowed
//! ```

mod draft;
mod published;

pub use draft::*;
pub use published::*;

use fulfillment_core::{Event, EventStatus};
use uuid::Uuid;

/// Wrapper enum for when the state type isn't known at compile time, e.g.
/// events loaded back out of storage.
#[derive(Debug, Clone)]
pub enum EventState {
    Draft(Draft),
    Published(Published),
}

impl EventState {
    /// Reconstruct the state from a persisted event's status field.
    pub fn from_event(event: Event) -> Self {
        match event.status {
            EventStatus::Draft => EventState::Draft(Draft::from_event(event)),
            EventStatus::Published => EventState::Published(Published::from_event(event)),
        }
    }

    pub fn event_id(&self) -> Option<Uuid> {
        match self {
            Self::Draft(state) => state.event_id,
            Self::Published(state) => state.event_id,
        }
    }

    /// State name for logging and display.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Draft(_) => "draft",
            Self::Published(_) => "published",
        }
    }

    pub fn event(&self) -> &Event {
        match self {
            Self::Draft(state) => state.event(),
            Self::Published(state) => state.event(),
        }
    }

    pub fn into_event(self) -> Event {
        match self {
            Self::Draft(state) => state.into_event(),
            Self::Published(state) => state.into_event(),
        }
    }
}

#[cfg(test)]
mod tests {
    use fulfillment_core::{OrderClosePolicy, TimeSlotsOption};
    use time::macros::{date, datetime, time};

    use super::*;

    fn draft_event() -> Event {
        Event {
            id: Some(Uuid::now_v7()),
            title: "Summer Fest".into(),
            description: "BBQ".into(),
            pre_order_date: date!(2024 - 06 - 20),
            pre_order_time: time!(09:00),
            order_close_policy: OrderClosePolicy::LastWindow,
            status: EventStatus::Draft,
            walk_up_ordering: false,
            walk_up_ordering_option: None,
            hide_open_time: false,
            hide_from_storefront: false,
            time_slots_option: TimeSlotsOption::Anytime,
            effective_close: None,
        }
    }

    #[test]
    fn test_state_is_reconstructed_from_the_status_field() {
        let state = EventState::from_event(draft_event());
        assert_eq!(state.state_name(), "draft");

        let mut event = draft_event();
        event.status = EventStatus::Published;
        let state = EventState::from_event(event);
        assert_eq!(state.state_name(), "published");
    }

    #[test]
    fn test_publish_flips_status_and_stamps_the_close_instant() {
        let EventState::Draft(draft) = EventState::from_event(draft_event()) else {
            panic!("expected draft");
        };

        let closes_at = datetime!(2024 - 07 - 04 15:00);
        let published = draft.into_published(Some(closes_at));
        assert_eq!(published.event().status, EventStatus::Published);
        assert_eq!(published.event().effective_close, Some(closes_at));

        let event = published.into_event();
        assert!(event.is_published());
    }
}
