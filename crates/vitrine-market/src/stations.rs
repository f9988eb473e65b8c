//! The stations a shopper passes through on the way out the door

use std::collections::{HashMap, VecDeque};

use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};
use vitrine_core::{RandomVariable, ShopperId, SimTime};

use crate::event::{Event, EventKind, Release};
use crate::shopper::Shopper;

/// Seconds between lane polls when every checkout is busy
pub const CHECKOUT_WAIT_TIME: SimTime = 30;

/// Fixed seconds of payment handling at the end of every checkout
pub const CHECKOUT_PAY_TIME: SimTime = 60;

/// Mutable simulation state every station works against
pub struct StationContext<'a> {
    pub shoppers: &'a mut HashMap<ShopperId, Shopper>,
    pub rng: &'a mut ChaCha8Rng,
}

/// A place that admits shoppers and lets them go.
///
/// Both calls receive the event that fired plus the shared context, and
/// answer with whatever follow-up events belong on the clock. Follow-ups
/// always land strictly in the future.
pub trait Station {
    fn enter(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event>;

    fn exit(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event>;
}

fn roster_fetch<'m>(
    shoppers: &'m mut HashMap<ShopperId, Shopper>,
    id: ShopperId,
) -> Option<&'m mut Shopper> {
    let shopper = shoppers.get_mut(&id);
    if shopper.is_none() {
        warn!(shopper = %id, "event names a shopper missing from the roster");
    }
    shopper
}

/// The store floor, where shoppers browse for the items on their list
pub struct StorePool {
    browsing: HashMap<ShopperId, SimTime>,
    retrieval_rv: RandomVariable,
}

impl StorePool {
    pub fn new(retrieval_rv: RandomVariable) -> Self {
        Self {
            browsing: HashMap::new(),
            retrieval_rv,
        }
    }

    pub fn len(&self) -> usize {
        self.browsing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.browsing.is_empty()
    }
}

impl Station for StorePool {
    /// Put the shopper on the floor for one retrieval draw per item, then
    /// send them to the queue
    fn enter(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        let Some(shopper) = roster_fetch(ctx.shoppers, event.shopper) else {
            return Vec::new();
        };

        self.browsing.insert(event.shopper, event.time);
        shopper.start_shopping(event.time);

        let shop_time = shopper.items_needed * self.retrieval_rv.draw(ctx.rng);
        trace!(shopper = %event.shopper, shop_time, "browsing the floor");

        vec![Event::with_release(
            event.time + shop_time,
            EventKind::EnterQueue,
            event.shopper,
            Release::StoreFloor,
        )]
    }

    fn exit(&mut self, _ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        if self.browsing.remove(&event.shopper).is_none() {
            warn!(shopper = %event.shopper, "floor release for a shopper not on the floor");
        }
        Vec::new()
    }
}

/// Single shared line in front of the checkout lanes
#[derive(Default)]
pub struct CheckoutQueue {
    waiting: VecDeque<ShopperId>,
}

impl CheckoutQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn head(&self) -> Option<ShopperId> {
        self.waiting.front().copied()
    }
}

impl Station for CheckoutQueue {
    /// Append the shopper. Whoever starts an empty line is called forward
    /// on the next second.
    fn enter(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        let Some(shopper) = roster_fetch(ctx.shoppers, event.shopper) else {
            return Vec::new();
        };

        self.waiting.push_back(event.shopper);
        shopper.join_queue(event.time, self.waiting.len() - 1);

        if self.waiting.len() == 1 {
            return vec![Event::with_release(
                event.time + 1,
                EventKind::EnterCheckout,
                event.shopper,
                Release::QueueHead,
            )];
        }
        Vec::new()
    }

    /// Pop the head, shuffle everyone else forward, and call the new head
    /// toward the lanes
    fn exit(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        let Some(popped) = self.waiting.pop_front() else {
            warn!(shopper = %event.shopper, "queue release with nobody waiting");
            return Vec::new();
        };
        if popped != event.shopper {
            warn!(
                expected = %event.shopper,
                popped = %popped,
                "queue head did not match the released shopper"
            );
        }

        for (position, id) in self.waiting.iter().enumerate() {
            if let Some(shopper) = ctx.shoppers.get_mut(id) {
                shopper.update_queue_position(position);
            }
        }

        match self.waiting.front() {
            Some(&head) => vec![Event::with_release(
                event.time + 1,
                EventKind::EnterCheckout,
                head,
                Release::QueueHead,
            )],
            None => Vec::new(),
        }
    }
}

/// The checkout lanes. A shopper needs a free lane to start scanning;
/// otherwise the attempt is rescheduled.
pub struct CheckoutPool {
    lanes: Vec<Option<ShopperId>>,
    scan_rv: RandomVariable,
}

impl CheckoutPool {
    pub fn new(lane_count: usize, scan_rv: RandomVariable) -> Self {
        Self {
            lanes: vec![None; lane_count],
            scan_rv,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn occupied(&self) -> usize {
        self.lanes.iter().filter(|lane| lane.is_some()).count()
    }

    /// Index of the first open lane
    pub fn free_lane(&self) -> Option<usize> {
        self.lanes.iter().position(|lane| lane.is_none())
    }

    pub fn lanes(&self) -> &[Option<ShopperId>] {
        &self.lanes
    }
}

impl Station for CheckoutPool {
    /// Claim the first open lane and schedule the shopper's departure after
    /// scanning and payment. With no lane open, the same attempt comes back
    /// after a fixed wait.
    fn enter(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        let Some(lane) = self.free_lane() else {
            trace!(shopper = %event.shopper, time = event.time, "every lane busy, polling again");
            return vec![event.retry_after(CHECKOUT_WAIT_TIME)];
        };

        let Some(shopper) = roster_fetch(ctx.shoppers, event.shopper) else {
            return Vec::new();
        };

        self.lanes[lane] = Some(event.shopper);
        shopper.start_checkout(event.time, lane);

        let service = shopper.items_needed * self.scan_rv.draw(ctx.rng) + CHECKOUT_PAY_TIME;
        trace!(shopper = %event.shopper, lane, service, "checkout started");

        vec![Event::new(
            event.time + service,
            EventKind::ExitCheckout,
            event.shopper,
        )]
    }

    /// Free the shopper's lane and send them home
    fn exit(&mut self, ctx: &mut StationContext<'_>, event: &Event) -> Vec<Event> {
        let Some(lane) = self
            .lanes
            .iter()
            .position(|lane| *lane == Some(event.shopper))
        else {
            warn!(shopper = %event.shopper, "checkout exit for a shopper not at any lane");
            return Vec::new();
        };

        self.lanes[lane] = None;
        if let Some(shopper) = roster_fetch(ctx.shoppers, event.shopper) {
            shopper.go_home(event.time);
        }
        Vec::new()
    }
}
