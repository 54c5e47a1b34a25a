pub mod config;
pub mod domain;

pub use config::*;
pub use domain::{
    evaluate_readiness, resolve_order_close, time_slots, EffectiveClose, Error, EventCoordinator,
    EventStorage, MenuCatalog, MissingRequirements, Readiness, SlotGrid, TimeSlot, WindowClose,
    WindowStore,
};
