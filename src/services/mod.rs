//! External collaborators.

pub mod market_data;

pub use market_data::{IndicatorProvider, IntradayContext, ProviderError, StaticIndicatorProvider};
