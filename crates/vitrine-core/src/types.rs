//! Identifiers and shared geometry for the exhibits

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulated seconds (or generations) since the start of a run
pub type SimTime = u64;

/// Unique identifier for a shopper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopperId(pub Uuid);

impl ShopperId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShopperId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShopperId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a creature in the colony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(pub Uuid);

impl CreatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CreatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an aircraft in a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AircraftId(pub Uuid);

impl AircraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AircraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AircraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D position on a grid or plot surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ShopperId::new();
        let b = ShopperId::new();
        assert_ne!(a, b);

        let c = CreatureId::new();
        let d = CreatureId::new();
        assert_ne!(c, d);
    }

    #[test]
    fn test_id_display_roundtrip() {
        let id = AircraftId::new();
        let text = id.to_string();
        let parsed = AircraftId(text.parse().unwrap());
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_coordinates_serde() {
        let at = Coordinates::new(3, -7);
        let json = serde_json::to_string(&at).unwrap();
        let back: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(at, back);
    }
}
