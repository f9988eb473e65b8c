//! The colony roster and its generational loop

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use vitrine_core::{ColonyConfig, Coordinates, Error, Result};
use vitrine_runner::Exhibit;

use crate::creature::{Creature, CreatureData, MAX_CHANCE, MIN_CHANCE};

/// One generation's population movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationChange {
    pub living: usize,
    pub delta: i64,
}

/// A population of creatures competing for room.
///
/// Each generation every living creature rolls to reproduce, everyone rolls
/// to survive under crowding pressure measured before the offspring landed,
/// and the survivors wander. Dead creatures stay on the roster.
pub struct Colony {
    config: ColonyConfig,
    creatures: Vec<Creature>,
    generation: u64,
    rng: ChaCha8Rng,
    population_history: Vec<usize>,
    fitness_history: Vec<f64>,
    change_history: Vec<PopulationChange>,
}

impl Colony {
    pub fn new(config: ColonyConfig) -> Result<Self> {
        if config.starting_population == 0 {
            return Err(Error::Validation(
                "colony needs at least one creature".to_string(),
            ));
        }
        if config.area_width <= 0 || config.area_height <= 0 {
            return Err(Error::InvalidDimensions {
                width: config.area_width,
                height: config.area_height,
            });
        }
        for (name, chance) in [
            ("replication_chance", config.replication_chance),
            ("death_chance", config.death_chance),
        ] {
            if !(MIN_CHANCE..=MAX_CHANCE).contains(&chance) {
                return Err(Error::Validation(format!(
                    "{name} must sit within [{MIN_CHANCE}, {MAX_CHANCE}], got {chance}"
                )));
            }
        }
        if config.crowding_coefficient < 0.0 {
            return Err(Error::Validation(
                "crowding coefficient cannot be negative".to_string(),
            ));
        }
        if config.child_offset_max < 0.0 {
            return Err(Error::Validation(
                "child offset cannot be negative".to_string(),
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let creatures = (0..config.starting_population)
            .map(|_| {
                let position = Coordinates::new(
                    rng.gen_range(0..=config.area_width),
                    rng.gen_range(0..=config.area_height),
                );
                Creature::new(
                    position,
                    config.replication_chance,
                    config.death_chance,
                    config.crowding_coefficient,
                    config.child_offset_max,
                )
            })
            .collect();

        debug!(
            starting = config.starting_population,
            area_width = config.area_width,
            area_height = config.area_height,
            "colony settled"
        );

        Ok(Self {
            config,
            creatures,
            generation: 0,
            rng,
            population_history: Vec::new(),
            fitness_history: Vec::new(),
            change_history: Vec::new(),
        })
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let living_before = self.living_count();

        let mut offspring: Vec<Creature> = Vec::new();
        for creature in &self.creatures {
            if creature.alive() {
                if let Some(child) = creature.try_reproduce(&mut self.rng) {
                    offspring.push(child);
                }
            }
        }

        // Crowding pressure counts the parents, not the newborns
        for creature in &mut self.creatures {
            creature.check_survival(living_before, &mut self.rng);
        }

        let born = offspring.len();
        self.creatures.extend(offspring);

        for creature in &mut self.creatures {
            if creature.alive() {
                creature.walk(self.config.area_width, self.config.area_height, &mut self.rng);
            }
        }

        self.generation += 1;
        self.record_generation(born);
    }

    fn record_generation(&mut self, born: usize) {
        let living = self.living_count();

        let delta = match self.population_history.last() {
            Some(&previous) => living as i64 - previous as i64,
            None => living as i64 - self.config.starting_population as i64,
        };

        let fitness = match self.average_rates() {
            Some((replication, death)) => replication - death,
            None => 0.0,
        };

        self.population_history.push(living);
        self.fitness_history.push(fitness);
        self.change_history.push(PopulationChange { living, delta });

        debug!(
            generation = self.generation,
            living, born, delta, "generation complete"
        );
    }

    /// Mean replication and death chances over the living
    fn average_rates(&self) -> Option<(f64, f64)> {
        let living: Vec<&Creature> = self.creatures.iter().filter(|c| c.alive()).collect();
        if living.is_empty() {
            return None;
        }

        let count = living.len() as f64;
        let replication = living.iter().map(|c| c.replication_chance).sum::<f64>() / count;
        let death = living.iter().map(|c| c.death_chance).sum::<f64>() / count;
        Some((replication, death))
    }

    pub fn living_count(&self) -> usize {
        self.creatures.iter().filter(|c| c.alive()).count()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn population_history(&self) -> &[usize] {
        &self.population_history
    }

    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    pub fn change_history(&self) -> &[PopulationChange] {
        &self.change_history
    }

    /// Equilibrium population implied by the current average rates, where
    /// crowding deaths balance replications
    pub fn expected_population(&self) -> Option<f64> {
        if self.config.crowding_coefficient <= 0.0 {
            return None;
        }
        let (replication, death) = self.average_rates()?;
        Some((replication - death) / self.config.crowding_coefficient)
    }

    pub fn snapshot(&self) -> ColonySnapshot {
        ColonySnapshot {
            generation: self.generation,
            living: self.living_count(),
            average_fitness: self
                .average_rates()
                .map(|(replication, death)| replication - death),
            expected_population: self.expected_population(),
            creatures: self.creatures.iter().map(CreatureData::from).collect(),
        }
    }

    /// Advance a fixed number of generations
    #[instrument(skip(self))]
    pub fn run(&mut self, generations: u64) {
        info!(living = self.living_count(), "colony run starting");

        for _ in 0..generations {
            self.step();
        }

        info!(
            living = self.living_count(),
            generation = self.generation,
            "colony run complete"
        );
    }
}

/// Rendering view of the colony after a generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonySnapshot {
    pub generation: u64,
    pub living: usize,
    pub average_fitness: Option<f64>,
    pub expected_population: Option<f64>,
    pub creatures: Vec<CreatureData>,
}

impl Exhibit for Colony {
    type Snapshot = ColonySnapshot;

    fn step(&mut self) {
        Colony::step(self);
    }

    fn snapshot(&self) -> ColonySnapshot {
        Colony::snapshot(self)
    }
}
