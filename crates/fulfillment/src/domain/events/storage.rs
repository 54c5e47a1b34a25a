//! External collaborator seams.
//!
//! Persistence and the menu catalog live outside the engine; the engine only
//! sees these traits and operates on the snapshots they return.

use async_trait::async_trait;
use fulfillment_core::{Event, NewPickupWindow, PickupWindow};
use uuid::Uuid;

use crate::domain::Error;

/// Event and pickup-window persistence, backed by the surrounding
/// application's REST layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Insert a new event and return its assigned identifier.
    async fn insert_event(&self, event: &Event) -> Result<Uuid, Error>;

    async fn update_event(&self, event: &Event) -> Result<(), Error>;

    /// Insert a new pickup window and return it with its assigned identifier.
    async fn insert_window(&self, window: &NewPickupWindow) -> Result<PickupWindow, Error>;

    async fn update_window(&self, window: &PickupWindow) -> Result<(), Error>;

    async fn delete_window(&self, id: Uuid) -> Result<(), Error>;

    async fn windows_for_event(&self, event_id: Uuid) -> Result<Vec<PickupWindow>, Error>;
}

/// Read-only view of the menu items associated with an event.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    async fn menu_item_count(&self, event_id: Uuid) -> Result<u64, Error>;
}
