mod events;
mod scheduling;
mod windows;

use std::collections::BTreeSet;
use std::fmt;

pub use events::*;
use fulfillment_core::{CoreError, MissingRequirement};
pub use scheduling::*;
use thiserror::Error;
use time::Time;
pub use windows::*;

/// The set of unmet publish preconditions, reported together so the caller
/// can render the full checklist at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRequirements(pub BTreeSet<MissingRequirement>);

impl fmt::Display for MissingRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for requirement in &self.0 {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", requirement)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("item not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(#[from] CoreError),
    #[error("no pickup windows available to determine an order close time")]
    NoWindowsAvailable,
    #[error("invalid pickup window: start {start} is not before end {end}")]
    InvalidWindow { start: Time, end: Time },
    #[error("event is missing: {0}")]
    NotReady(MissingRequirements),
    #[error("storage error: {0}")]
    Storage(String),
}
