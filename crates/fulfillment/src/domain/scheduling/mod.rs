mod close;
mod slots;

pub use close::*;
pub use slots::*;
