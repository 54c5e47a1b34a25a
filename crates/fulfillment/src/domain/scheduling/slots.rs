//! Discretization of a pickup window into customer-selectable time slots.

use fulfillment_core::{clock, PickupWindow, TimeSlotsOption};
use serde::{Deserialize, Serialize};
use time::{Duration, Time};

use crate::domain::Error;

/// One selectable pickup choice inside a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "clock::serde_time")]
    pub slot_start: Time,
    #[serde(with = "clock::serde_time")]
    pub slot_end: Time,
}

/// Lazy iterator over a window's slots.
///
/// Cloning restarts the sequence; identical inputs always yield identical
/// slots. No slot extends past the window's declared end: the final slot is
/// clamped when the window length is not an exact multiple of the interval.
#[derive(Debug, Clone)]
pub struct SlotGrid {
    cursor: Time,
    end: Time,
    /// `None` means "anytime": the whole window as a single slot
    step: Option<Duration>,
}

/// Build the slot sequence for one pickup window.
///
/// A window whose start is not strictly before its end is rejected with
/// [`Error::InvalidWindow`]. Saved windows can never violate that invariant,
/// but the discretizer checks rather than trusting its input.
pub fn time_slots(window: &PickupWindow, option: TimeSlotsOption) -> Result<SlotGrid, Error> {
    if window.start_time >= window.end_time {
        return Err(Error::InvalidWindow {
            start: window.start_time,
            end: window.end_time,
        });
    }

    let step = match option {
        TimeSlotsOption::Anytime => None,
        TimeSlotsOption::Interval { minutes } => {
            if minutes == 0 {
                return Err(Error::BadRequest(
                    "slot interval must be a positive number of minutes".into(),
                ));
            }
            Some(Duration::minutes(i64::from(minutes)))
        }
    };

    Ok(SlotGrid {
        cursor: window.start_time,
        end: window.end_time,
        step,
    })
}

impl Iterator for SlotGrid {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.cursor >= self.end {
            return None;
        }

        let slot_start = self.cursor;
        let slot_end = match self.step {
            None => self.end,
            Some(step) => {
                let remaining = self.end - self.cursor;
                if step >= remaining {
                    self.end
                } else {
                    // Stays strictly before `end`, so the add cannot wrap
                    // past midnight
                    self.cursor + step
                }
            }
        };
        self.cursor = slot_end;

        Some(TimeSlot {
            slot_start,
            slot_end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.cursor).whole_seconds();
        if remaining <= 0 {
            return (0, Some(0));
        }
        let count = match self.step {
            None => 1,
            Some(step) => {
                let step_seconds = step.whole_seconds();
                ((remaining + step_seconds - 1) / step_seconds) as usize
            }
        };
        (count, Some(count))
    }
}

impl ExactSizeIterator for SlotGrid {}
