//! Headless driver that walks through every exhibit once

mod telemetry;

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use vitrine_colony::Colony;
use vitrine_core::{ColonyConfig, GridConfig, MarketConfig, RunnerConfig, ScheduleConfig};
use vitrine_flights::Schedule;
use vitrine_life::Grid;
use vitrine_market::{Simulator, NOTIFY_INTERVAL};
use vitrine_runner::Runner;

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    info!("opening the gallery");

    run_life()?;
    run_market()?;
    run_colony()?;
    run_flights()?;

    info!("every exhibit has run");
    Ok(())
}

/// Let a seeded gun fire for a while
fn run_life() -> Result<()> {
    let config = GridConfig {
        seed_living: true,
        seed: 11,
        ..GridConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let grid = Grid::from_config(&config, &mut rng)?;

    info!(width = config.width, height = config.height, "life exhibit open");

    let pacing = RunnerConfig {
        tick_interval_ms: 10,
        publish_every: 1,
    };
    let (runner, snapshots) = Runner::spawn(grid, pacing);

    for snapshot in snapshots.iter().take(120) {
        if snapshot.generation % 30 == 0 {
            info!(
                generation = snapshot.generation,
                live = snapshot.live,
                "life generation"
            );
        }
    }

    let grid = runner.stop();
    info!(
        generation = grid.generation(),
        live = grid.live_count(),
        "life exhibit closed"
    );
    Ok(())
}

/// A full simulated day at the market, watched at the notification cadence
fn run_market() -> Result<()> {
    let simulator = Simulator::new(MarketConfig::default())?;

    info!("market exhibit open");

    let pacing = RunnerConfig {
        tick_interval_ms: 0,
        publish_every: NOTIFY_INTERVAL,
    };
    let (runner, snapshots) = Runner::spawn(simulator, pacing);

    for snapshot in snapshots.iter() {
        // Four simulated hours between progress lines
        if snapshot.time % 14_400 == 0 {
            info!(
                time = snapshot.time,
                shoppers = snapshot.shoppers.len(),
                waiting = snapshot.queue_length,
                lanes_in_use = snapshot.lanes_in_use,
                "market progress"
            );
        }
    }

    let simulator = runner.stop();
    info!(
        shoppers = simulator.shopper_count(),
        average_wait = ?simulator.average_wait(),
        "market exhibit closed"
    );
    Ok(())
}

/// Eighty generations of creatures competing for the plot
fn run_colony() -> Result<()> {
    let config = ColonyConfig {
        child_offset_max: 0.05,
        seed: 3,
        ..ColonyConfig::default()
    };
    let colony = Colony::new(config)?;

    info!("colony exhibit open");

    let pacing = RunnerConfig {
        tick_interval_ms: 0,
        publish_every: 1,
    };
    let (runner, snapshots) = Runner::spawn(colony, pacing);

    for snapshot in snapshots.iter().take(80) {
        if snapshot.generation % 20 == 0 {
            info!(
                generation = snapshot.generation,
                living = snapshot.living,
                expected = ?snapshot.expected_population,
                "colony generation"
            );
        }
    }

    let colony = runner.stop();
    info!(
        generation = colony.generation(),
        living = colony.living_count(),
        "colony exhibit closed"
    );
    Ok(())
}

/// One shot of the schedule generator
fn run_flights() -> Result<()> {
    let config = ScheduleConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let schedule = Schedule::generate(&config, &mut rng)?;

    info!(
        fleet = schedule.lines.len(),
        legs = schedule.flight_count(),
        "flights exhibit generated"
    );

    if let Some(line) = schedule.lines.first() {
        for flight in line.flights.iter().take(3) {
            debug!(
                tail = %line.tail,
                designator = %flight.designator,
                origin = %flight.origin,
                destination = %flight.destination,
                "sample leg"
            );
        }
    }

    Ok(())
}
