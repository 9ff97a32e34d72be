//! Entities - the hourly forecast series and its observations

mod observation;
mod series;

pub use observation::Observation;
pub use series::Series;
