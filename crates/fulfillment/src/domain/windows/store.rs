//! In-memory pickup window collection for a single event.
//!
//! Windows are kept ordered by (pickup date, start time). The store is meant
//! for one logical caller at a time; the surrounding application serializes
//! edits against reads.

use fulfillment_core::PickupWindow;
use log::debug;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::domain::Error;

#[derive(Debug, Clone, Default)]
pub struct WindowStore {
    windows: Vec<PickupWindow>,
}

fn window_order(a: &PickupWindow, b: &PickupWindow) -> Ordering {
    a.pickup_date
        .cmp(&b.pickup_date)
        .then(a.start_time.cmp(&b.start_time))
        .then(a.id.cmp(&b.id))
}

impl WindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from windows loaded out of the external store.
    pub fn from_windows(mut windows: Vec<PickupWindow>) -> Self {
        windows.sort_by(window_order);
        Self { windows }
    }

    pub fn add(&mut self, window: PickupWindow) {
        debug!(
            "tracking window {} on {} for event {}",
            window.id, window.pickup_date, window.event_id
        );
        let position = self
            .windows
            .partition_point(|existing| window_order(existing, &window) != Ordering::Greater);
        self.windows.insert(position, window);
    }

    /// Swap out the window with the same id, re-sorting since its date or
    /// times may have changed.
    pub fn replace(&mut self, window: PickupWindow) -> Result<(), Error> {
        let position = self
            .windows
            .iter()
            .position(|existing| existing.id == window.id)
            .ok_or_else(|| Error::NotFound(format!("pickup window {}", window.id)))?;
        self.windows.remove(position);
        self.add(window);
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<PickupWindow, Error> {
        let position = self
            .windows
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| Error::NotFound(format!("pickup window {}", id)))?;
        Ok(self.windows.remove(position))
    }

    pub fn get(&self, id: Uuid) -> Option<&PickupWindow> {
        self.windows.iter().find(|window| window.id == id)
    }

    /// All windows, ordered by pickup date then start time.
    pub fn list(&self) -> &[PickupWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window whose (pickup date, end time) is latest. When two windows
    /// end at the identical instant, the smaller identifier wins.
    pub fn latest_end(&self) -> Result<&PickupWindow, Error> {
        let mut latest: Option<&PickupWindow> = None;
        for window in &self.windows {
            latest = match latest {
                None => Some(window),
                Some(best) => match window.ends_at().cmp(&best.ends_at()) {
                    Ordering::Greater => Some(window),
                    Ordering::Equal if window.id < best.id => Some(window),
                    _ => Some(best),
                },
            };
        }
        latest.ok_or(Error::NoWindowsAvailable)
    }
}
