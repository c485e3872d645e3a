//! Application layer: configuration, events, the dataset importer,
//! dashboard assembly, and demo seeding.

pub mod config;
pub mod dashboard;
pub mod events;
pub mod importer;
pub mod seed;
pub mod station;

pub use config::Config;
pub use events::{EventSink, LogSink};
