//! Concurrent news classification: many feed connections append positive
//! headlines to one accumulator, a timer drains it into a ranked digest.

pub mod analysis;
pub mod app;
pub mod config;
pub mod domain;
pub mod feed;
pub mod infrastructure;
pub mod server;
pub mod tasks;
