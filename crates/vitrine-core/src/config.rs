//! Configuration for the exhibits

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::SimTime;
use crate::variate::RandomVariableConfig;

/// Configuration for the cellular automaton grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// Seed the grid with a starting pattern instead of leaving it empty
    pub seed_living: bool,
    /// Random seed for pattern selection
    pub seed: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            seed_living: false,
            seed: 0,
        }
    }
}

/// Configuration for the grocery checkout simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Number of checkout lanes
    pub checkout_lanes: usize,
    /// Simulated seconds between new shopper arrivals
    pub arrival_interval: u64,
    /// Shoppers already inside when the doors open
    pub initial_shoppers: usize,
    /// Simulated seconds in a full run
    pub horizon: SimTime,
    /// Distribution of items on a shopper's list
    pub items_rv: RandomVariableConfig,
    /// Distribution of seconds spent retrieving one item
    pub retrieval_rv: RandomVariableConfig,
    /// Distribution of seconds spent scanning one item
    pub scan_rv: RandomVariableConfig,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            checkout_lanes: 3,
            arrival_interval: 120, // One new shopper every two simulated minutes
            initial_shoppers: 10,
            horizon: 86_400, // 24 simulated hours
            items_rv: RandomVariableConfig::normal(15.0, 20.0),
            retrieval_rv: RandomVariableConfig::normal(30.0, 20.0),
            scan_rv: RandomVariableConfig::normal(15.0, 10.0),
            seed: 0,
        }
    }
}

/// Configuration for the population competition colony
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColonyConfig {
    /// Creatures present at generation zero
    pub starting_population: usize,
    /// Chance a creature replicates each generation
    pub replication_chance: f64,
    /// Chance a creature dies each generation, before crowding
    pub death_chance: f64,
    /// Additional death chance per living creature
    pub crowding_coefficient: f64,
    /// Maximum deviation of an offspring's rates from its parent
    pub child_offset_max: f64,
    /// Plot area width
    pub area_width: i32,
    /// Plot area height
    pub area_height: i32,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            starting_population: 10,
            replication_chance: 0.1,
            death_chance: 0.05,
            crowding_coefficient: 0.001,
            child_offset_max: 0.0,
            area_width: 600,
            area_height: 400,
            seed: 0,
        }
    }
}

/// Configuration for the flight schedule generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of aircraft in the fleet
    pub fleet_size: usize,
    /// Stations visited in rotation order
    pub stations: Vec<String>,
    /// Window start; defaults to today at 06:00 UTC when unset
    pub start: Option<DateTime<Utc>>,
    /// Window length in days
    pub days: i64,
    /// Largest random offset applied to a first departure, in minutes either way
    pub start_offset_minutes: i64,
    /// Shortest flight time in minutes
    pub min_flight_minutes: i64,
    /// Longest flight time in minutes
    pub max_flight_minutes: i64,
    /// Shortest turnaround in minutes
    pub min_turnaround_minutes: i64,
    /// Longest turnaround in minutes
    pub max_turnaround_minutes: i64,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fleet_size: 15,
            stations: vec!["ATL".to_string(), "LGA".to_string(), "SEA".to_string()],
            start: None,
            days: 3,
            start_offset_minutes: 30,
            min_flight_minutes: 200,
            max_flight_minutes: 300,
            min_turnaround_minutes: 30,
            max_turnaround_minutes: 120,
            seed: 0,
        }
    }
}

/// Pacing for a background exhibit runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Milliseconds of wall clock between steps; zero runs flat out
    pub tick_interval_ms: u64,
    /// Publish a snapshot every this many steps
    pub publish_every: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 180,
            publish_every: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_market_config() {
        let config = MarketConfig::default();
        assert_eq!(config.checkout_lanes, 3);
        assert_eq!(config.horizon, 86_400);
        assert_eq!(config.items_rv.alpha, 15.0);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ColonyConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ColonyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.starting_population, config.starting_population);
        assert_eq!(back.crowding_coefficient, config.crowding_coefficient);
    }

    #[test]
    fn test_schedule_defaults_use_three_stations() {
        let config = ScheduleConfig::default();
        assert_eq!(config.stations.len(), 3);
        assert_eq!(config.fleet_size, 15);
        assert!(config.start.is_none());
    }
}
