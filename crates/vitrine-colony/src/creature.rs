//! An individual creature and its chances

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use vitrine_core::{Coordinates, CreatureId};

/// Lower clamp for replication and death chances
pub const MIN_CHANCE: f64 = 0.01;

/// Upper clamp for replication and death chances
pub const MAX_CHANCE: f64 = 0.25;

/// Furthest a creature wanders per generation, on each axis
pub const MAX_MOVE_DISTANCE: i32 = 20;

/// One creature wandering the plot. Death is permanent; a dead creature
/// ignores every later roll.
#[derive(Debug, Clone)]
pub struct Creature {
    pub id: CreatureId,
    pub position: Coordinates,
    pub replication_chance: f64,
    pub death_chance: f64,
    pub crowding_coefficient: f64,
    pub child_offset_max: f64,
    alive: bool,
}

impl Creature {
    pub fn new(
        position: Coordinates,
        replication_chance: f64,
        death_chance: f64,
        crowding_coefficient: f64,
        child_offset_max: f64,
    ) -> Self {
        Self {
            id: CreatureId::new(),
            position,
            replication_chance,
            death_chance,
            crowding_coefficient,
            child_offset_max,
            alive: true,
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Roll for offspring. A child appears at the parent's spot with rates
    /// nudged from the parent's, clamped to the allowed band.
    pub fn try_reproduce(&self, rng: &mut ChaCha8Rng) -> Option<Creature> {
        if !self.alive {
            return None;
        }
        if rng.gen::<f64>() > self.replication_chance {
            return None;
        }

        Some(Creature::new(
            self.position,
            perturbed_chance(self.replication_chance, self.child_offset_max, rng),
            perturbed_chance(self.death_chance, self.child_offset_max, rng),
            self.crowding_coefficient,
            self.child_offset_max,
        ))
    }

    /// Roll for death under the current crowding pressure
    pub fn check_survival(&mut self, living_population: usize, rng: &mut ChaCha8Rng) {
        if !self.alive {
            return;
        }

        let crowded_chance = self.death_chance + self.crowding_coefficient * living_population as f64;
        if rng.gen::<f64>() <= crowded_chance {
            self.alive = false;
        }
    }

    /// Wander to a uniform spot within reach, clamped to the plot area
    pub fn walk(&mut self, area_width: i32, area_height: i32, rng: &mut ChaCha8Rng) {
        let low_x = (self.position.x - MAX_MOVE_DISTANCE).max(0);
        let high_x = (self.position.x + MAX_MOVE_DISTANCE).min(area_width);
        let low_y = (self.position.y - MAX_MOVE_DISTANCE).max(0);
        let high_y = (self.position.y + MAX_MOVE_DISTANCE).min(area_height);

        self.position = Coordinates::new(
            rng.gen_range(low_x..=high_x),
            rng.gen_range(low_y..=high_y),
        );
    }
}

/// Parent rate shifted by up to the offset, kept inside the allowed band
fn perturbed_chance(parent: f64, offset_max: f64, rng: &mut ChaCha8Rng) -> f64 {
    let low = (parent - offset_max).max(MIN_CHANCE);
    let high = (parent + offset_max).min(MAX_CHANCE);
    rng.gen_range(low..=high)
}

/// Rendering view of a creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureData {
    pub id: CreatureId,
    pub position: Coordinates,
    pub alive: bool,
    pub replication_chance: f64,
    pub death_chance: f64,
    /// Replication minus death chance, the color axis of the plot
    pub fitness: f64,
}

impl From<&Creature> for CreatureData {
    fn from(creature: &Creature) -> Self {
        Self {
            id: creature.id,
            position: creature.position,
            alive: creature.alive,
            replication_chance: creature.replication_chance,
            death_chance: creature.death_chance,
            fitness: creature.replication_chance - creature.death_chance,
        }
    }
}
