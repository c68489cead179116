//! Level calculators: intraday (ATR-based) and swing (structural).

pub mod intraday;
pub mod swing;

pub use intraday::*;
pub use swing::*;
