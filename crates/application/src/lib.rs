//! Application layer - Use cases and orchestration
//!
//! Defines the ports the forecast pipeline depends on and the services that
//! turn a fetched series into a report for the presentation layers.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
