//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod speed_unit;
mod wind_direction;

pub use geo_location::GeoLocation;
pub use speed_unit::SpeedUnit;
pub use wind_direction::{CompassSector, normalize_degrees};
