//! The automaton grid and its update rule

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitrine_core::{Coordinates, Error, GridConfig, Result};
use vitrine_runner::Exhibit;

use crate::cell::Cell;
use crate::patterns;

/// A living cell stays alive with two or three living neighbors
pub fn survives(live_neighbors: usize) -> bool {
    (2..=3).contains(&live_neighbors)
}

/// A dead cell comes alive with exactly three living neighbors
pub fn is_born(live_neighbors: usize) -> bool {
    live_neighbors == 3
}

/// Rectangular cell matrix, stored flat in row-major order
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
    generation: u64,
}

impl Grid {
    /// Empty grid of dead cells. Width and height must both be above zero.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::empty(Coordinates::new(x, y)));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            generation: 0,
        })
    }

    /// Grid from configuration, optionally seeded with a starting pattern
    /// sized for its dimensions
    pub fn from_config(config: &GridConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        let mut grid = Self::new(config.width, config.height)?;

        if config.seed_living {
            let start = patterns::pick_start(config.width, config.height, rng);
            for &(x, y) in start {
                grid.set(Cell::new(Coordinates::new(x, y), true));
            }
            debug!(live = grid.live_count(), "seeded starting pattern");
        }

        Ok(grid)
    }

    fn in_bounds(&self, at: Coordinates) -> bool {
        at.x >= 0 && at.x < self.width && at.y >= 0 && at.y < self.height
    }

    fn index(&self, at: Coordinates) -> usize {
        (at.y * self.width + at.x) as usize
    }

    /// Cell at the given coordinates, or a logged nothing outside the grid
    pub fn get(&self, at: Coordinates) -> Option<&Cell> {
        if !self.in_bounds(at) {
            warn!(%at, "no cell at coordinates");
            return None;
        }
        Some(&self.cells[self.index(at)])
    }

    /// Replace the cell at the given coordinates. Out-of-bounds writes are
    /// logged and dropped.
    pub fn set(&mut self, cell: Cell) {
        if !self.in_bounds(cell.coordinates) {
            warn!(at = %cell.coordinates, "no cell at coordinates");
            return;
        }
        let index = self.index(cell.coordinates);
        self.cells[index] = cell;
    }

    /// Living neighbors of a cell. The neighborhood clips at the grid
    /// edges rather than wrapping.
    pub fn live_neighbors(&self, at: Coordinates) -> usize {
        let low_x = (at.x - 1).max(0);
        let high_x = (at.x + 1).min(self.width - 1);
        let low_y = (at.y - 1).max(0);
        let high_y = (at.y + 1).min(self.height - 1);

        let mut count = 0;
        for y in low_y..=high_y {
            for x in low_x..=high_x {
                if x == at.x && y == at.y {
                    continue;
                }
                if self.cells[self.index(Coordinates::new(x, y))].alive {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance one generation. Every cell's fate is decided against the
    /// current matrix, then the whole matrix is replaced at once.
    pub fn step(&mut self) {
        let mut next = Vec::with_capacity(self.cells.len());

        for y in 0..self.height {
            for x in 0..self.width {
                let at = Coordinates::new(x, y);
                let neighbors = self.live_neighbors(at);
                let alive = self.cells[self.index(at)].alive;
                let next_alive = if alive {
                    survives(neighbors)
                } else {
                    is_born(neighbors)
                };
                next.push(Cell::new(at, next_alive));
            }
        }

        self.cells = next;
        self.generation += 1;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            generation: self.generation,
            live: self.live_count(),
            cells: self.cells.clone(),
        }
    }
}

/// Rendering view of the grid after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub width: i32,
    pub height: i32,
    pub generation: u64,
    pub live: usize,
    pub cells: Vec<Cell>,
}

impl Exhibit for Grid {
    type Snapshot = GridSnapshot;

    fn step(&mut self) {
        Grid::step(self);
    }

    fn snapshot(&self) -> GridSnapshot {
        Grid::snapshot(self)
    }
}
