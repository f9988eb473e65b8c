//! Scheduled events on the simulation clock

use serde::{Deserialize, Serialize};
use vitrine_core::{ShopperId, SimTime};

/// What happens to the shopper when the event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    EnterStore,
    EnterQueue,
    EnterCheckout,
    ExitCheckout,
}

/// Which station must let go of the shopper as the event fires.
///
/// A station schedules the shopper's next stop before the shopper has
/// actually left; the tag defers the release until admission happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Release {
    /// Remove the shopper from the store floor
    StoreFloor,
    /// Pop the shopper from the head of the checkout queue
    QueueHead,
}

/// One scheduled transition for one shopper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub time: SimTime,
    pub kind: EventKind,
    pub shopper: ShopperId,
    pub release: Option<Release>,
}

impl Event {
    pub fn new(time: SimTime, kind: EventKind, shopper: ShopperId) -> Self {
        Self {
            time,
            kind,
            shopper,
            release: None,
        }
    }

    pub fn with_release(time: SimTime, kind: EventKind, shopper: ShopperId, release: Release) -> Self {
        Self {
            time,
            kind,
            shopper,
            release: Some(release),
        }
    }

    /// The same event rescheduled into the future, release tag intact
    pub fn retry_after(&self, delay: SimTime) -> Self {
        Self {
            time: self.time + delay,
            ..self.clone()
        }
    }
}
