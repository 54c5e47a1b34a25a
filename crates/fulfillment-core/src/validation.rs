//! Field-level validation for event and pickup-window form drafts.
//!
//! Every violated rule is collected before returning, so the caller can
//! render the complete set of inline messages in one pass.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::{Date, Time};
use uuid::Uuid;

use crate::{
    clock, CoreError, Event, EventStatus, NewPickupWindow, OrderClosePolicy, TimeSlotsOption,
    WalkUpOrderingOption, SLOT_INTERVAL_MINUTES,
};

pub const TITLE_MAX_CHARS: usize = 150;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Map of field name to inline message, one entry per violated rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Event form fields as submitted, before any rule has been checked
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        with = "clock::serde_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_order_date: Option<Date>,
    #[serde(
        default,
        with = "clock::serde_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_order_time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_close_policy: Option<OrderClosePolicy>,
    #[serde(default)]
    pub walk_up_ordering: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_up_ordering_option: Option<WalkUpOrderingOption>,
    #[serde(default)]
    pub hide_open_time: bool,
    #[serde(default)]
    pub hide_from_storefront: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slots_option: Option<TimeSlotsOption>,
}

/// Pickup window form fields as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PickupWindowDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(
        default,
        with = "clock::serde_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pickup_date: Option<Date>,
    #[serde(
        default,
        with = "clock::serde_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<Time>,
    #[serde(
        default,
        with = "clock::serde_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<Time>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_location_id: Option<Uuid>,
    #[serde(default)]
    pub time_zone_label: String,
}

/// Validate an event draft against the save rules.
///
/// `today` is the current date at validation time, passed in by the caller so
/// the check is a pure function of its inputs. A valid draft becomes a draft
/// `Event` with no resolved close instant yet.
pub fn validate_event_draft(draft: &EventDraft, today: Date) -> Result<Event, CoreError> {
    let mut errors = FieldErrors::new();

    if draft.title.is_empty() {
        errors.insert("title", "required");
    } else if draft.title.chars().count() > TITLE_MAX_CHARS {
        errors.insert(
            "title",
            format!("must be {} characters or fewer", TITLE_MAX_CHARS),
        );
    }

    if draft.description.chars().count() > DESCRIPTION_MAX_CHARS {
        errors.insert(
            "description",
            format!("must be {} characters or fewer", DESCRIPTION_MAX_CHARS),
        );
    }

    match draft.pre_order_date {
        None => errors.insert("pre_order_date", "required"),
        Some(date) if date < today => errors.insert("pre_order_date", "cannot be before today"),
        Some(_) => {}
    }

    if draft.pre_order_time.is_none() {
        errors.insert("pre_order_time", "required");
    }

    if draft.order_close_policy.is_none() {
        errors.insert("order_close_policy", "required");
    }

    if draft.walk_up_ordering_option.is_some() && !draft.walk_up_ordering {
        errors.insert(
            "walk_up_ordering_option",
            "requires walk-up ordering to be enabled",
        );
    }

    if let Some(TimeSlotsOption::Interval { minutes }) = draft.time_slots_option {
        if !SLOT_INTERVAL_MINUTES.contains(&minutes) {
            errors.insert(
                "time_slots_option",
                format!("{} minutes is not an offered slot interval", minutes),
            );
        }
    }

    match (
        draft.pre_order_date,
        draft.pre_order_time,
        draft.order_close_policy.clone(),
    ) {
        (Some(pre_order_date), Some(pre_order_time), Some(order_close_policy))
            if errors.is_empty() =>
        {
            Ok(Event {
                id: draft.id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                pre_order_date,
                pre_order_time,
                order_close_policy,
                status: EventStatus::Draft,
                walk_up_ordering: draft.walk_up_ordering,
                walk_up_ordering_option: draft.walk_up_ordering_option,
                hide_open_time: draft.hide_open_time,
                hide_from_storefront: draft.hide_from_storefront,
                time_slots_option: draft.time_slots_option.unwrap_or(TimeSlotsOption::Anytime),
                effective_close: None,
            })
        }
        _ => Err(CoreError::Validation(errors)),
    }
}

/// Validate a pickup window draft against the save rules.
///
/// Start strictly before end is a field-level error, not an exception; all
/// four data fields are required before the window can be saved.
pub fn validate_window_draft(
    draft: &PickupWindowDraft,
    event_id: Uuid,
) -> Result<NewPickupWindow, CoreError> {
    let mut errors = FieldErrors::new();

    if draft.pickup_date.is_none() {
        errors.insert("pickup_date", "required");
    }
    if draft.start_time.is_none() {
        errors.insert("start_time", "required");
    }
    if draft.end_time.is_none() {
        errors.insert("end_time", "required");
    }
    if draft.pickup_location_id.is_none() {
        errors.insert("pickup_location_id", "required");
    }

    if let (Some(start), Some(end)) = (draft.start_time, draft.end_time) {
        if start >= end {
            errors.insert("start_time", "must be before the end time");
        }
    }

    match (
        draft.pickup_date,
        draft.start_time,
        draft.end_time,
        draft.pickup_location_id,
    ) {
        (Some(pickup_date), Some(start_time), Some(end_time), Some(pickup_location_id))
            if errors.is_empty() =>
        {
            Ok(NewPickupWindow {
                event_id,
                pickup_date,
                start_time,
                end_time,
                pickup_location_id,
                time_zone_label: draft.time_zone_label.clone(),
            })
        }
        _ => Err(CoreError::Validation(errors)),
    }
}
