//! Market session calendar.

pub mod calendar;

pub use calendar::MarketCalendar;
