//! Daily "on this day" digest: a day's historical events plus a dad joke,
//! boiled down to a fixed-shape JSON payload.

pub mod client;
pub mod config;
pub mod model;
pub mod selector;
pub mod today;
pub mod year;

pub use client::{FetchError, HistoryClient};
pub use config::{Config, ConfigError};
pub use model::{format_date, Event, FactPayload};
pub use selector::{pick_fact, select_facts, Category, FactSelector, Selection};
pub use today::{build_payload, respond, today};
