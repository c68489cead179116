//! Analysis card assembly.

pub mod builder;
pub mod quick_reject;
pub mod warnings;

pub use builder::{build_card, decide_action, CardContext};
pub use quick_reject::{build_quick_reject, levels_to_watch_for, SnapshotLevel};
pub use warnings::collect_warnings;
