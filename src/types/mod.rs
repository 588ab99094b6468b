pub mod interval;
pub mod location;
pub mod measurement;
pub mod series;
