//! Orchestrates event saves and the draft-to-published transition.
//!
//! Validation and the publish guard run locally over already-fetched
//! snapshots; persistence is only reached once they pass.

use std::sync::Arc;

use fulfillment_core::{
    validate_event_draft, validate_window_draft, Event, EventDraft, PickupWindow,
    PickupWindowDraft,
};
use log::{debug, info};
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use crate::domain::{
    evaluate_readiness, resolve_order_close, Draft, Error, EventState, EventStorage, MenuCatalog,
    Readiness, WindowStore,
};

pub struct EventCoordinator {
    storage: Arc<dyn EventStorage>,
    menu: Arc<dyn MenuCatalog>,
    /// Fixed offset the storefront displays times in; used to pick "today"
    /// for save validation.
    display_offset: UtcOffset,
}

impl EventCoordinator {
    pub fn new(
        storage: Arc<dyn EventStorage>,
        menu: Arc<dyn MenuCatalog>,
        display_offset: UtcOffset,
    ) -> Self {
        Self {
            storage,
            menu,
            display_offset,
        }
    }

    fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(self.display_offset).date()
    }

    /// Create an event in draft status via an explicit save.
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, Error> {
        let mut event = validate_event_draft(draft, self.today())?;
        let id = self.storage.insert_event(&event).await?;
        event.id = Some(id);
        info!("created draft event {}", id);
        Ok(event)
    }

    /// Re-save a draft. Always allowed; no readiness guard applies.
    pub async fn save_event(&self, draft: &EventDraft) -> Result<Event, Error> {
        let event = validate_event_draft(draft, self.today())?;
        let id = event.id.ok_or_else(|| {
            Error::BadRequest("event must be created before it can be re-saved".into())
        })?;
        self.storage.update_event(&event).await?;
        debug!("saved draft event {}", id);
        Ok(event)
    }

    /// Validate and persist a new pickup window for an event.
    pub async fn add_window(
        &self,
        event_id: Uuid,
        draft: &PickupWindowDraft,
    ) -> Result<PickupWindow, Error> {
        let new_window = validate_window_draft(draft, event_id)?;
        let window = self.storage.insert_window(&new_window).await?;
        debug!("added pickup window {} to event {}", window.id, event_id);
        Ok(window)
    }

    /// Validate and persist edits to an existing pickup window.
    pub async fn update_window(
        &self,
        event_id: Uuid,
        draft: &PickupWindowDraft,
    ) -> Result<PickupWindow, Error> {
        let id = draft.id.ok_or_else(|| {
            Error::BadRequest("pickup window must be created before it can be edited".into())
        })?;
        let window = validate_window_draft(draft, event_id)?.into_window(id);
        self.storage.update_window(&window).await?;
        debug!("updated pickup window {}", id);
        Ok(window)
    }

    pub async fn remove_window(&self, id: Uuid) -> Result<(), Error> {
        self.storage.delete_window(id).await?;
        debug!("removed pickup window {}", id);
        Ok(())
    }

    /// Fetch the event's windows into an ordered snapshot.
    pub async fn windows(&self, event_id: Uuid) -> Result<WindowStore, Error> {
        let windows = self.storage.windows_for_event(event_id).await?;
        Ok(WindowStore::from_windows(windows))
    }

    /// Readiness checklist for the event timeline UI.
    pub async fn readiness(&self, event: &Event) -> Result<Readiness, Error> {
        let event_id = event.id.ok_or_else(|| {
            Error::BadRequest("event must be created before it can be published".into())
        })?;
        let windows = self.storage.windows_for_event(event_id).await?;
        let menu_items = self.menu.menu_item_count(event_id).await?;
        Ok(evaluate_readiness(event, windows.len() as u64, menu_items))
    }

    /// Publish a draft event.
    ///
    /// The readiness guard runs synchronously over the supplied snapshot and
    /// short-circuits with the full set of missing reasons before any
    /// persistence call is attempted. On success the resolved close instant
    /// is stored alongside the raw policy.
    pub async fn publish_event(
        &self,
        event: Event,
        windows: &WindowStore,
        menu_item_count: u64,
    ) -> Result<Event, Error> {
        let event_id = event.id.ok_or_else(|| {
            Error::BadRequest("event must be created before it can be published".into())
        })?;

        let draft = match EventState::from_event(event) {
            EventState::Draft(draft) => draft,
            other => {
                return Err(Error::BadRequest(format!(
                    "only draft events can be published, event {} is {}",
                    event_id,
                    other.state_name()
                )))
            }
        };

        self.guard_publish(&draft, windows, menu_item_count)?;

        let effective_close =
            resolve_order_close(&draft.event().order_close_policy, windows)?.earliest();
        let published = draft.into_published(effective_close);
        self.storage.update_event(published.event()).await?;
        info!("published event {}", event_id);
        Ok(published.into_event())
    }

    /// Local, synchronous publish guard. Must pass before anything is
    /// persisted.
    fn guard_publish(
        &self,
        draft: &Draft,
        windows: &WindowStore,
        menu_item_count: u64,
    ) -> Result<(), Error> {
        // Unreachable for events saved through draft validation; checked so
        // the readiness reason set stays exact
        if draft.event().title.is_empty() {
            return Err(Error::BadRequest("event title is required".into()));
        }

        match evaluate_readiness(draft.event(), windows.len() as u64, menu_item_count) {
            Readiness::Ready => Ok(()),
            Readiness::NotReady { missing } => {
                info!(
                    "publish of event {:?} rejected, missing: {}",
                    draft.event_id, missing
                );
                Err(Error::NotReady(missing))
            }
        }
    }
}
