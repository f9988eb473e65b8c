//! The cyclic station rotation

use serde::{Deserialize, Serialize};
use vitrine_core::{Error, Result};

/// Ordered stations an aircraft visits over and over. Indexing wraps, so
/// any leg number resolves to a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    stations: Vec<String>,
}

impl Rotation {
    /// An empty rotation has no next stop, so at least one station is
    /// required
    pub fn new(stations: Vec<String>) -> Result<Self> {
        if stations.is_empty() {
            return Err(Error::Validation(
                "rotation needs at least one station".to_string(),
            ));
        }
        Ok(Self { stations })
    }

    /// Station at a rotation index, modulo the rotation length
    pub fn station(&self, index: usize) -> &str {
        &self.stations[index % self.stations.len()]
    }

    /// Station right after the given index
    pub fn next(&self, index: usize) -> &str {
        self.station(index + 1)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atl_lga_sea() -> Rotation {
        Rotation::new(vec![
            "ATL".to_string(),
            "LGA".to_string(),
            "SEA".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_rejects_an_empty_rotation() {
        assert!(matches!(
            Rotation::new(Vec::new()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_indexing_wraps_around() {
        let rotation = atl_lga_sea();
        assert_eq!(rotation.station(0), "ATL");
        assert_eq!(rotation.station(1), "LGA");
        assert_eq!(rotation.station(2), "SEA");
        assert_eq!(rotation.station(3), "ATL");
        assert_eq!(rotation.station(301), "LGA");
    }

    #[test]
    fn test_next_follows_the_cycle() {
        let rotation = atl_lga_sea();
        assert_eq!(rotation.next(0), "LGA");
        assert_eq!(rotation.next(2), "ATL");
    }

    #[test]
    fn test_single_station_cycles_to_itself() {
        let rotation = Rotation::new(vec!["ATL".to_string()]).unwrap();
        assert_eq!(rotation.station(7), "ATL");
        assert_eq!(rotation.next(7), "ATL");
    }
}
