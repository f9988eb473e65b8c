//! Random airline schedule generation

pub mod flight;
pub mod rotation;
pub mod schedule;

pub use flight::Flight;
pub use rotation::Rotation;
pub use schedule::{LineOfFlight, Schedule};
