//! Whole-fleet schedule generation

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_core::{AircraftId, Error, Result, ScheduleConfig};

use crate::flight::Flight;
use crate::rotation::Rotation;

/// Every leg one aircraft flies over the window, in departure order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOfFlight {
    pub aircraft: AircraftId,
    pub tail: String,
    pub flights: Vec<Flight>,
}

/// A generated schedule for the whole fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub lines: Vec<LineOfFlight>,
}

impl Schedule {
    /// Generate a random schedule.
    ///
    /// Each aircraft starts near the window open, offset by a random few
    /// minutes, then flies leg after leg along the station rotation until
    /// the next departure would fall past the window close. A leg that
    /// departs inside the window may land after it.
    pub fn generate(config: &ScheduleConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        let rotation = Rotation::new(config.stations.clone())?;

        if config.days < 1 {
            return Err(Error::Validation(
                "schedule window must cover at least one day".to_string(),
            ));
        }
        if config.min_flight_minutes < 1 || config.min_flight_minutes > config.max_flight_minutes {
            return Err(Error::Validation(format!(
                "flight time bounds [{}, {}] are unusable",
                config.min_flight_minutes, config.max_flight_minutes
            )));
        }
        if config.min_turnaround_minutes < 0
            || config.min_turnaround_minutes > config.max_turnaround_minutes
        {
            return Err(Error::Validation(format!(
                "turnaround bounds [{}, {}] are unusable",
                config.min_turnaround_minutes, config.max_turnaround_minutes
            )));
        }
        if config.start_offset_minutes < 0 {
            return Err(Error::Validation(
                "start offset cannot be negative".to_string(),
            ));
        }

        let start = config.start.unwrap_or_else(default_start);
        let end = start + Duration::days(config.days);

        let mut lines = Vec::with_capacity(config.fleet_size);
        for aircraft_index in 0..config.fleet_size {
            let offset =
                rng.gen_range(-config.start_offset_minutes..=config.start_offset_minutes);
            let mut departure = start + Duration::minutes(offset);
            let mut previous_in = None;
            let mut flights = Vec::new();
            let mut leg = 0usize;

            while departure < end {
                let designator = format!("FL{}", rng.gen_range(100..=999));
                let arrival = departure
                    + Duration::minutes(
                        rng.gen_range(config.min_flight_minutes..=config.max_flight_minutes),
                    );

                flights.push(Flight {
                    designator,
                    origin: rotation.station(aircraft_index + leg).to_string(),
                    destination: rotation.next(aircraft_index + leg).to_string(),
                    out_time: departure,
                    in_time: arrival,
                    previous_in_time: previous_in,
                });

                previous_in = Some(arrival);
                departure = arrival
                    + Duration::minutes(
                        rng.gen_range(
                            config.min_turnaround_minutes..=config.max_turnaround_minutes,
                        ),
                    );
                leg += 1;
            }

            debug!(aircraft = aircraft_index, legs = flights.len(), "line of flight built");
            lines.push(LineOfFlight {
                aircraft: AircraftId::new(),
                tail: format!("AC{}", aircraft_index + 1),
                flights,
            });
        }

        Ok(Self { start, end, lines })
    }

    /// Total legs across the fleet
    pub fn flight_count(&self) -> usize {
        self.lines.iter().map(|line| line.flights.len()).sum()
    }

    /// Every leg in the schedule, fleet order then departure order
    pub fn flights(&self) -> impl Iterator<Item = &Flight> {
        self.lines.iter().flat_map(|line| line.flights.iter())
    }
}

/// Today at 06:00 UTC
fn default_start() -> DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_hms_opt(6, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(Utc::now)
}
