//! A single grid cell

use serde::{Deserialize, Serialize};
use vitrine_core::Coordinates;

/// One cell of the automaton, pinned to its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coordinates: Coordinates,
    pub alive: bool,
}

impl Cell {
    pub fn new(coordinates: Coordinates, alive: bool) -> Self {
        Self { coordinates, alive }
    }

    /// Dead cell at the given spot
    pub fn empty(coordinates: Coordinates) -> Self {
        Self::new(coordinates, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_are_dead() {
        let cell = Cell::empty(Coordinates::new(2, 3));
        assert!(!cell.alive);
        assert_eq!(cell.coordinates, Coordinates::new(2, 3));
    }
}
