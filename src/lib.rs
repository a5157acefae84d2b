//! Works out which teams have qualified for the World Championship from RobotEvents data.
//!
//! Teams qualify by winning a qualifying award at an event. The slots of award winners who
//! were already qualified go to the best teams of the skills ranking that have not qualified
//! yet. [`RobotEventsClient`] fetches events, awards and skills scores; the rules themselves
//! live in [`qualification`] and work on plain data.

pub use client::RobotEventsClient;
pub use config::ClientConfig;
pub use error::{QualError, Result};
pub use model::*;
pub use scraper::events::sku_from_url;

pub mod config;
pub mod error;
pub mod model;
pub mod qualification;

pub(crate) mod api;
mod client;
mod http;
pub(crate) mod scraper;
