//! Stochastic population competition exhibit

pub mod colony;
pub mod creature;

pub use colony::{Colony, ColonySnapshot, PopulationChange};
pub use creature::{Creature, CreatureData, MAX_CHANCE, MAX_MOVE_DISTANCE, MIN_CHANCE};
