//! Setup engine: decides whether an equity shows a tradeable setup and, when it
//! does, computes its price levels, score and the resulting analysis card.

pub mod cache;
pub mod cards;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod levels;
pub mod logging;
pub mod market;
pub mod models;
pub mod services;
pub mod signals;
