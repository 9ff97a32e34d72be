//! Domain layer for windwatch
//!
//! Contains the hourly wind series, its value objects and the pure analysis
//! pipeline (window selection, summary, event detection, axis labels, fusion).
//! This layer performs no I/O and never reads the wall clock.

pub mod analysis;
pub mod entities;
pub mod errors;
pub mod serde_time;
pub mod value_objects;

pub use analysis::*;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
