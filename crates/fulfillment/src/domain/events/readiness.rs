//! Publish-eligibility evaluation.
//!
//! An event may move from draft to published only once it has a description,
//! at least one menu item, and at least one pickup window. Every unmet
//! condition is reported, not just the first, so the timeline UI can show
//! the whole checklist at once.

use std::collections::BTreeSet;

use fulfillment_core::{Event, MissingRequirement};

use crate::domain::MissingRequirements;

/// Outcome of a readiness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady { missing: MissingRequirements },
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Evaluate whether an event satisfies the publish preconditions.
///
/// The window and menu counts come from the caller's already-fetched
/// snapshot; the check itself is a pure function of its inputs.
pub fn evaluate_readiness(
    event: &Event,
    pickup_window_count: u64,
    menu_item_count: u64,
) -> Readiness {
    let mut missing = BTreeSet::new();

    if event.description.is_empty() {
        missing.insert(MissingRequirement::MissingDescription);
    }
    if menu_item_count == 0 {
        missing.insert(MissingRequirement::NoMenuItems);
    }
    if pickup_window_count == 0 {
        missing.insert(MissingRequirement::NoPickupWindows);
    }

    if missing.is_empty() {
        Readiness::Ready
    } else {
        Readiness::NotReady {
            missing: MissingRequirements(missing),
        }
    }
}
