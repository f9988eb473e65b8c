//! A single scheduled leg

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One leg of an aircraft's line of flight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Designator in the FL100..FL999 range
    pub designator: String,
    pub origin: String,
    pub destination: String,
    pub out_time: DateTime<Utc>,
    pub in_time: DateTime<Utc>,
    /// Arrival time of the preceding leg, when there is one
    pub previous_in_time: Option<DateTime<Utc>>,
}

impl Flight {
    /// Scheduled block time in minutes
    pub fn block_minutes(&self) -> i64 {
        (self.in_time - self.out_time).num_minutes()
    }

    /// Ground time since the preceding leg landed, in minutes
    pub fn turnaround_minutes(&self) -> Option<i64> {
        self.previous_in_time
            .map(|previous| (self.out_time - previous).num_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn leg(out_minute: i64, in_minute: i64, previous_in: Option<i64>) -> Flight {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap();
        Flight {
            designator: "FL123".to_string(),
            origin: "ATL".to_string(),
            destination: "LGA".to_string(),
            out_time: base + chrono::Duration::minutes(out_minute),
            in_time: base + chrono::Duration::minutes(in_minute),
            previous_in_time: previous_in.map(|m| base + chrono::Duration::minutes(m)),
        }
    }

    #[test]
    fn test_block_time_spans_out_to_in() {
        let flight = leg(0, 240, None);
        assert_eq!(flight.block_minutes(), 240);
        assert_eq!(flight.turnaround_minutes(), None);
    }

    #[test]
    fn test_turnaround_measures_ground_time() {
        let flight = leg(300, 540, Some(250));
        assert_eq!(flight.turnaround_minutes(), Some(50));
    }
}
