//! End-to-end flow over an in-memory storage double: create a draft, get
//! rejected for publish, add a pickup window, publish, and enumerate the
//! slots a customer could pick.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fulfillment::{
    time_slots, Error, EventCoordinator, EventStorage, MenuCatalog, Readiness, WindowStore,
};
use fulfillment_core::{
    Event, EventDraft, MissingRequirement, NewPickupWindow, OrderClosePolicy, PickupWindow,
    PickupWindowDraft, TimeSlotsOption,
};
use time::macros::{date, datetime, time};
use time::UtcOffset;
use uuid::Uuid;

#[derive(Default)]
struct InMemoryStorage {
    events: Mutex<HashMap<Uuid, Event>>,
    windows: Mutex<Vec<PickupWindow>>,
}

#[async_trait]
impl EventStorage for InMemoryStorage {
    async fn insert_event(&self, event: &Event) -> Result<Uuid, Error> {
        let id = Uuid::now_v7();
        let mut stored = event.clone();
        stored.id = Some(id);
        self.events.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn update_event(&self, event: &Event) -> Result<(), Error> {
        let id = event
            .id
            .ok_or_else(|| Error::Storage("event has no id".into()))?;
        let mut events = self.events.lock().unwrap();
        if !events.contains_key(&id) {
            return Err(Error::NotFound(format!("event {}", id)));
        }
        events.insert(id, event.clone());
        Ok(())
    }

    async fn insert_window(&self, window: &NewPickupWindow) -> Result<PickupWindow, Error> {
        let window = window.clone().into_window(Uuid::now_v7());
        self.windows.lock().unwrap().push(window.clone());
        Ok(window)
    }

    async fn update_window(&self, window: &PickupWindow) -> Result<(), Error> {
        let mut windows = self.windows.lock().unwrap();
        let position = windows
            .iter()
            .position(|existing| existing.id == window.id)
            .ok_or_else(|| Error::NotFound(format!("pickup window {}", window.id)))?;
        windows[position] = window.clone();
        Ok(())
    }

    async fn delete_window(&self, id: Uuid) -> Result<(), Error> {
        let mut windows = self.windows.lock().unwrap();
        let position = windows
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| Error::NotFound(format!("pickup window {}", id)))?;
        windows.remove(position);
        Ok(())
    }

    async fn windows_for_event(&self, event_id: Uuid) -> Result<Vec<PickupWindow>, Error> {
        Ok(self
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter(|window| window.event_id == event_id)
            .cloned()
            .collect())
    }
}

struct FixedMenu(u64);

#[async_trait]
impl MenuCatalog for FixedMenu {
    async fn menu_item_count(&self, _event_id: Uuid) -> Result<u64, Error> {
        Ok(self.0)
    }
}

fn summer_fest_draft() -> EventDraft {
    EventDraft {
        title: "Summer Fest".into(),
        description: "BBQ".into(),
        pre_order_date: Some(date!(2099 - 06 - 20)),
        pre_order_time: Some(time!(09:00)),
        order_close_policy: Some(OrderClosePolicy::LastWindow),
        time_slots_option: Some(TimeSlotsOption::Interval { minutes: 60 }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_draft_to_published_with_hourly_slots() {
    let storage = Arc::new(InMemoryStorage::default());
    let coordinator = EventCoordinator::new(
        storage.clone(),
        Arc::new(FixedMenu(5)),
        UtcOffset::from_hms(-5, 0, 0).unwrap(),
    );

    // Explicit save creates the event in draft
    let event = coordinator.create_event(&summer_fest_draft()).await.unwrap();
    let event_id = event.id.expect("id assigned on create");
    assert!(event.is_draft());

    // The timeline checklist reports the one unmet condition
    let readiness = coordinator.readiness(&event).await.unwrap();
    let Readiness::NotReady { missing } = readiness else {
        panic!("expected not ready before any window exists");
    };
    assert_eq!(
        missing.0.into_iter().collect::<Vec<_>>(),
        vec![MissingRequirement::NoPickupWindows]
    );

    // Publishing with the same snapshot short-circuits locally; storage
    // still holds a draft afterward
    let rejected = coordinator
        .publish_event(event.clone(), &WindowStore::new(), 5)
        .await;
    assert!(matches!(rejected, Err(Error::NotReady(_))));
    assert!(storage.events.lock().unwrap()[&event_id].is_draft());

    // Add the 2099-07-04 12:00-15:00 window and retry
    let window_draft = PickupWindowDraft {
        pickup_date: Some(date!(2099 - 07 - 04)),
        start_time: Some(time!(12:00)),
        end_time: Some(time!(15:00)),
        pickup_location_id: Some(Uuid::now_v7()),
        time_zone_label: "America/Chicago".into(),
        ..Default::default()
    };
    let window = coordinator.add_window(event_id, &window_draft).await.unwrap();

    let windows = coordinator.windows(event_id).await.unwrap();
    assert_eq!(windows.len(), 1);

    let published = coordinator
        .publish_event(event, &windows, 5)
        .await
        .unwrap();
    assert!(published.is_published());
    // last_window policy: orders close when the only window ends
    assert_eq!(
        published.effective_close,
        Some(datetime!(2099 - 07 - 04 15:00))
    );
    assert!(storage.events.lock().unwrap()[&event_id].is_published());

    // The storefront offers three hourly pickup choices
    let slots: Vec<_> = time_slots(&window, published.time_slots_option)
        .unwrap()
        .map(|slot| (slot.slot_start, slot.slot_end))
        .collect();
    assert_eq!(
        slots,
        vec![
            (time!(12:00), time!(13:00)),
            (time!(13:00), time!(14:00)),
            (time!(14:00), time!(15:00)),
        ]
    );
}

#[tokio::test]
async fn test_window_edits_flow_through_storage() {
    let storage = Arc::new(InMemoryStorage::default());
    let coordinator = EventCoordinator::new(
        storage.clone(),
        Arc::new(FixedMenu(1)),
        UtcOffset::from_hms(-5, 0, 0).unwrap(),
    );

    let event = coordinator.create_event(&summer_fest_draft()).await.unwrap();
    let event_id = event.id.unwrap();

    let draft = PickupWindowDraft {
        pickup_date: Some(date!(2099 - 07 - 04)),
        start_time: Some(time!(12:00)),
        end_time: Some(time!(15:00)),
        pickup_location_id: Some(Uuid::now_v7()),
        time_zone_label: "America/Chicago".into(),
        ..Default::default()
    };
    let window = coordinator.add_window(event_id, &draft).await.unwrap();

    // Edit the window to a later afternoon
    let edited = PickupWindowDraft {
        id: Some(window.id),
        start_time: Some(time!(13:00)),
        end_time: Some(time!(16:00)),
        ..draft.clone()
    };
    let updated = coordinator.update_window(event_id, &edited).await.unwrap();
    assert_eq!(updated.start_time, time!(13:00));

    let windows = coordinator.windows(event_id).await.unwrap();
    assert_eq!(windows.list()[0].end_time, time!(16:00));

    // Remove it and the event can no longer be published
    coordinator.remove_window(window.id).await.unwrap();
    let windows = coordinator.windows(event_id).await.unwrap();
    assert!(windows.is_empty());

    let rejected = coordinator.publish_event(event, &windows, 1).await;
    let Err(Error::NotReady(missing)) = rejected else {
        panic!("expected NotReady after removing the only window");
    };
    assert!(missing.0.contains(&MissingRequirement::NoPickupWindows));
}
