//! Effective order-close resolution.
//!
//! Given the event's close policy and its pickup windows, computes the
//! instant(s) after which new orders are rejected. Resolution is a pure
//! function of the snapshot it is handed; callers re-run it on every edit.

use fulfillment_core::{clock, OrderClosePolicy};
use log::debug;
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::domain::{Error, WindowStore};

/// One window's close instant under the `time_before` policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowClose {
    pub window_id: Uuid,
    #[serde(with = "clock::serde_datetime")]
    pub closes_at: PrimitiveDateTime,
}

/// The resolved close time(s) for an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectiveClose {
    /// One event-wide instant (`last_window` and `specific_time` policies)
    AtInstant {
        #[serde(with = "clock::serde_datetime")]
        closes_at: PrimitiveDateTime,
    },
    /// One instant per window (`time_before` policy), in window order
    PerWindow { closes: Vec<WindowClose> },
}

impl EffectiveClose {
    /// The single binding instant: for per-window closes this is the earliest
    /// one, since the first window to open is the first to stop taking
    /// orders. `None` only when a per-window resolution saw zero windows.
    pub fn earliest(&self) -> Option<PrimitiveDateTime> {
        match self {
            EffectiveClose::AtInstant { closes_at } => Some(*closes_at),
            EffectiveClose::PerWindow { closes } => {
                closes.iter().map(|close| close.closes_at).min()
            }
        }
    }
}

/// Resolve the effective close time(s) for an event.
///
/// `last_window` fails with [`Error::NoWindowsAvailable`] when the store is
/// empty; the caller must surface "cannot determine close time" rather than
/// defaulting. `specific_time` is valid even with zero windows.
pub fn resolve_order_close(
    policy: &OrderClosePolicy,
    windows: &WindowStore,
) -> Result<EffectiveClose, Error> {
    match policy {
        OrderClosePolicy::LastWindow => {
            let window = windows.latest_end()?;
            debug!(
                "orders close when window {} ends on {}",
                window.id, window.pickup_date
            );
            Ok(EffectiveClose::AtInstant {
                closes_at: window.ends_at(),
            })
        }
        OrderClosePolicy::TimeBefore { hours, minutes } => {
            let closes = windows
                .list()
                .iter()
                .map(|window| WindowClose {
                    window_id: window.id,
                    closes_at: clock::minus_lead(
                        window.pickup_date,
                        window.start_time,
                        *hours,
                        *minutes,
                    ),
                })
                .collect();
            Ok(EffectiveClose::PerWindow { closes })
        }
        OrderClosePolicy::SpecificTime {
            close_date,
            close_time,
        } => Ok(EffectiveClose::AtInstant {
            closes_at: clock::instant(*close_date, *close_time),
        }),
    }
}
