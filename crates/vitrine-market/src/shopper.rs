//! Shoppers and their trip through the store

use serde::{Deserialize, Serialize};
use tracing::warn;
use vitrine_core::{ShopperId, SimTime};

/// Stages of a shopping trip, in the order they happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShopperState {
    Init,
    Shopping,
    InQueue,
    CheckingOut,
    GoneHome,
}

/// One shopper. State only ever moves forward; a transition requested out
/// of order is logged and dropped.
#[derive(Debug, Clone)]
pub struct Shopper {
    pub id: ShopperId,
    pub items_needed: u64,
    state: ShopperState,
    queue_position: Option<usize>,
    lane: Option<usize>,
    entered_store: Option<SimTime>,
    entered_queue: Option<SimTime>,
    entered_checkout: Option<SimTime>,
    exited_checkout: Option<SimTime>,
}

impl Shopper {
    pub fn new(items_needed: u64) -> Self {
        Self {
            id: ShopperId::new(),
            items_needed,
            state: ShopperState::Init,
            queue_position: None,
            lane: None,
            entered_store: None,
            entered_queue: None,
            entered_checkout: None,
            exited_checkout: None,
        }
    }

    pub fn state(&self) -> ShopperState {
        self.state
    }

    pub fn queue_position(&self) -> Option<usize> {
        self.queue_position
    }

    pub fn lane(&self) -> Option<usize> {
        self.lane
    }

    pub fn entered_store(&self) -> Option<SimTime> {
        self.entered_store
    }

    pub fn entered_queue(&self) -> Option<SimTime> {
        self.entered_queue
    }

    pub fn entered_checkout(&self) -> Option<SimTime> {
        self.entered_checkout
    }

    pub fn exited_checkout(&self) -> Option<SimTime> {
        self.exited_checkout
    }

    fn out_of_order(&self, wanted: ShopperState) {
        warn!(
            shopper = %self.id,
            state = ?self.state,
            wanted = ?wanted,
            "transition out of order, ignoring"
        );
    }

    /// Init -> Shopping, on walking through the doors
    pub fn start_shopping(&mut self, time: SimTime) {
        if self.state != ShopperState::Init {
            self.out_of_order(ShopperState::Shopping);
            return;
        }
        self.state = ShopperState::Shopping;
        self.entered_store = Some(time);
    }

    /// Shopping -> InQueue, taking a place at the given index
    pub fn join_queue(&mut self, time: SimTime, position: usize) {
        if self.state != ShopperState::Shopping {
            self.out_of_order(ShopperState::InQueue);
            return;
        }
        self.state = ShopperState::InQueue;
        self.entered_queue = Some(time);
        self.queue_position = Some(position);
    }

    /// Shuffle forward as the queue drains
    pub fn update_queue_position(&mut self, position: usize) {
        if self.state != ShopperState::InQueue {
            self.out_of_order(ShopperState::InQueue);
            return;
        }
        self.queue_position = Some(position);
    }

    /// InQueue -> CheckingOut, claiming a lane
    pub fn start_checkout(&mut self, time: SimTime, lane: usize) {
        if self.state != ShopperState::InQueue {
            self.out_of_order(ShopperState::CheckingOut);
            return;
        }
        self.state = ShopperState::CheckingOut;
        self.entered_checkout = Some(time);
        self.queue_position = None;
        self.lane = Some(lane);
    }

    /// CheckingOut -> GoneHome, freeing the lane
    pub fn go_home(&mut self, time: SimTime) {
        if self.state != ShopperState::CheckingOut {
            self.out_of_order(ShopperState::GoneHome);
            return;
        }
        self.state = ShopperState::GoneHome;
        self.exited_checkout = Some(time);
        self.lane = None;
    }

    /// Seconds spent waiting in the queue, once checkout has started
    pub fn queue_wait(&self) -> Option<SimTime> {
        match (self.entered_checkout, self.entered_queue) {
            (Some(checkout), Some(queue)) => Some(checkout - queue),
            _ => None,
        }
    }
}

/// Rendering view of a shopper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopperData {
    pub id: ShopperId,
    pub items_needed: u64,
    pub state: ShopperState,
    pub queue_position: Option<usize>,
    pub lane: Option<usize>,
    pub entered_store: Option<SimTime>,
    pub entered_queue: Option<SimTime>,
    pub entered_checkout: Option<SimTime>,
    pub exited_checkout: Option<SimTime>,
}

impl From<&Shopper> for ShopperData {
    fn from(shopper: &Shopper) -> Self {
        Self {
            id: shopper.id,
            items_needed: shopper.items_needed,
            state: shopper.state,
            queue_position: shopper.queue_position,
            lane: shopper.lane,
            entered_store: shopper.entered_store,
            entered_queue: shopper.entered_queue,
            entered_checkout: shopper.entered_checkout,
            exited_checkout: shopper.exited_checkout,
        }
    }
}
