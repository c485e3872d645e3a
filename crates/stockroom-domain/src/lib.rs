//! Domain layer: entity models and the pure services that operate on them.

pub mod model;
pub mod service;

pub use model::*;
