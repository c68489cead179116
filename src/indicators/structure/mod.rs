//! Market structure: classic pivots, recent swing range

pub mod pivots;
pub mod support_resistance;

pub use pivots::*;
pub use support_resistance::*;
