//! Shared types between the fulfillment engine and the surrounding application

use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime, Time};
use uuid::Uuid;

use crate::clock;

/// Slot interval choices offered in the event form, in minutes.
pub const SLOT_INTERVAL_MINUTES: [u16; 10] = [5, 10, 12, 15, 20, 30, 45, 60, 90, 120];

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Draft,
    Published,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Draft => write!(f, "draft"),
            EventStatus::Published => write!(f, "published"),
        }
    }
}

/// How walk-up customers place orders when walk-up ordering is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkUpOrderingOption {
    Asap,
    PickupWindows,
}

/// Order-close policy; exactly one variant is active per event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum OrderClosePolicy {
    /// Close when the latest pickup window for the event ends
    LastWindow,
    /// Close a fixed lead ahead of each pickup window's start.
    /// A 0/0 lead closes exactly at the window start.
    TimeBefore { hours: u16, minutes: u16 },
    /// Close at one absolute date and time, independent of windows
    SpecificTime {
        #[serde(with = "clock::serde_date")]
        close_date: Date,
        #[serde(with = "clock::serde_time")]
        close_time: Time,
    },
}

/// Per-event slot discretization choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", rename_all = "snake_case")]
pub enum TimeSlotsOption {
    /// The whole window is offered as one continuous choice
    Anytime,
    /// Fixed-interval grid starting at the window's start time
    Interval { minutes: u16 },
}

/// A publish precondition the event does not yet satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRequirement {
    MissingDescription,
    NoMenuItems,
    NoPickupWindows,
}

impl fmt::Display for MissingRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingRequirement::MissingDescription => write!(f, "a description"),
            MissingRequirement::NoMenuItems => write!(f, "at least one menu item"),
            MissingRequirement::NoPickupWindows => write!(f, "at least one pickup window"),
        }
    }
}

/// Event record as persisted by the external store.
///
/// The identifier is absent until the first successful save. Times are wall
/// clock in the storefront's display zone; no conversion is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub description: String,
    #[serde(with = "clock::serde_date")]
    pub pre_order_date: Date,
    #[serde(with = "clock::serde_time")]
    pub pre_order_time: Time,
    pub order_close_policy: OrderClosePolicy,
    pub status: EventStatus,
    pub walk_up_ordering: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_up_ordering_option: Option<WalkUpOrderingOption>,
    pub hide_open_time: bool,
    pub hide_from_storefront: bool,
    pub time_slots_option: TimeSlotsOption,
    /// Effective close instant resolved at publish time, kept alongside the
    /// raw policy for later re-display. For the `time_before` policy this is
    /// the earliest per-window close.
    #[serde(
        default,
        with = "clock::serde_datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub effective_close: Option<PrimitiveDateTime>,
}

impl Event {
    pub fn opens_at(&self) -> PrimitiveDateTime {
        clock::instant(self.pre_order_date, self.pre_order_time)
    }

    pub fn is_draft(&self) -> bool {
        self.status == EventStatus::Draft
    }

    pub fn is_published(&self) -> bool {
        self.status == EventStatus::Published
    }
}

/// A validated pickup window that has not been saved yet, so it has no
/// identifier. The external store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPickupWindow {
    pub event_id: Uuid,
    #[serde(with = "clock::serde_date")]
    pub pickup_date: Date,
    #[serde(with = "clock::serde_time")]
    pub start_time: Time,
    #[serde(with = "clock::serde_time")]
    pub end_time: Time,
    pub pickup_location_id: Uuid,
    /// Informational label shown next to the window; never used in arithmetic
    pub time_zone_label: String,
}

impl NewPickupWindow {
    /// Attach the identifier assigned by the store on insert.
    pub fn into_window(self, id: Uuid) -> PickupWindow {
        PickupWindow {
            id,
            event_id: self.event_id,
            pickup_date: self.pickup_date,
            start_time: self.start_time,
            end_time: self.end_time,
            pickup_location_id: self.pickup_location_id,
            time_zone_label: self.time_zone_label,
        }
    }
}

/// Pickup window record as persisted by the external store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupWindow {
    pub id: Uuid,
    pub event_id: Uuid,
    #[serde(with = "clock::serde_date")]
    pub pickup_date: Date,
    #[serde(with = "clock::serde_time")]
    pub start_time: Time,
    #[serde(with = "clock::serde_time")]
    pub end_time: Time,
    pub pickup_location_id: Uuid,
    /// Informational label shown next to the window; never used in arithmetic
    pub time_zone_label: String,
}

impl PickupWindow {
    pub fn starts_at(&self) -> PrimitiveDateTime {
        clock::instant(self.pickup_date, self.start_time)
    }

    pub fn ends_at(&self) -> PrimitiveDateTime {
        clock::instant(self.pickup_date, self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::{date, time};

    use super::*;

    #[test]
    fn test_close_policy_tagged_serialization() {
        let policy = OrderClosePolicy::TimeBefore {
            hours: 1,
            minutes: 30,
        };
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"option": "time_before", "hours": 1, "minutes": 30})
        );

        let policy = OrderClosePolicy::SpecificTime {
            close_date: date!(2024 - 06 - 01),
            close_time: time!(18:00),
        };
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "option": "specific_time",
                "close_date": "2024-06-01",
                "close_time": "18:00"
            })
        );
    }

    #[test]
    fn test_time_slots_option_serialization() {
        let json = serde_json::to_value(TimeSlotsOption::Anytime).unwrap();
        assert_eq!(json, serde_json::json!({"option": "anytime"}));

        let json = serde_json::to_value(TimeSlotsOption::Interval { minutes: 60 }).unwrap();
        assert_eq!(json, serde_json::json!({"option": "interval", "minutes": 60}));
    }

    #[test]
    fn test_window_instants_use_the_pickup_date() {
        let window = NewPickupWindow {
            event_id: Uuid::now_v7(),
            pickup_date: date!(2024 - 07 - 04),
            start_time: time!(12:00),
            end_time: time!(15:00),
            pickup_location_id: Uuid::now_v7(),
            time_zone_label: "CT".into(),
        }
        .into_window(Uuid::now_v7());

        assert_eq!(window.starts_at().date(), date!(2024 - 07 - 04));
        assert_eq!(window.ends_at().time(), time!(15:00));
        assert!(window.starts_at() < window.ends_at());
    }
}
