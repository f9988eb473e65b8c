//! The market clock, its event list, and the dispatch loop

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use vitrine_core::{Error, MarketConfig, RandomVariable, Result, ShopperId, SimTime};
use vitrine_runner::Exhibit;

use crate::event::{Event, EventKind, Release};
use crate::shopper::{Shopper, ShopperData, ShopperState};
use crate::stations::{CheckoutPool, CheckoutQueue, Station, StationContext, StorePool};

/// Simulated seconds between snapshot notifications to a watching renderer
pub const NOTIFY_INTERVAL: SimTime = 30;

/// Discrete-event simulation of a day at the market.
///
/// The clock advances one simulated second per step. Every event scheduled
/// at or before the current second is popped in one batch, then dispatched;
/// follow-up events never run in the same batch, even when due.
pub struct Simulator {
    config: MarketConfig,
    time: SimTime,
    pending: Vec<Event>,
    shoppers: HashMap<ShopperId, Shopper>,
    arrival_order: Vec<ShopperId>,
    store: StorePool,
    queue: CheckoutQueue,
    checkouts: CheckoutPool,
    items_rv: RandomVariable,
    rng: ChaCha8Rng,
    wait_total: SimTime,
    wait_count: u64,
}

impl Simulator {
    pub fn new(config: MarketConfig) -> Result<Self> {
        if config.checkout_lanes == 0 {
            return Err(Error::Validation(
                "market needs at least one checkout lane".to_string(),
            ));
        }
        if config.arrival_interval == 0 {
            return Err(Error::Validation(
                "shopper arrival interval must be above zero".to_string(),
            ));
        }

        let mut simulator = Self {
            time: 0,
            pending: Vec::new(),
            shoppers: HashMap::new(),
            arrival_order: Vec::new(),
            store: StorePool::new(RandomVariable::new(config.retrieval_rv)),
            queue: CheckoutQueue::new(),
            checkouts: CheckoutPool::new(
                config.checkout_lanes,
                RandomVariable::new(config.scan_rv),
            ),
            items_rv: RandomVariable::new(config.items_rv),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            wait_total: 0,
            wait_count: 0,
            config,
        };

        for _ in 0..simulator.config.initial_shoppers {
            simulator.admit_shopper();
        }

        debug!(
            shoppers = simulator.config.initial_shoppers,
            lanes = simulator.config.checkout_lanes,
            "market opened"
        );

        Ok(simulator)
    }

    /// Create a shopper with a fresh item list and put their store entrance
    /// on the clock
    fn admit_shopper(&mut self) {
        let shopper = Shopper::new(self.items_rv.draw(&mut self.rng));
        let id = shopper.id;

        trace!(shopper = %id, items = shopper.items_needed, time = self.time, "shopper arriving");

        self.arrival_order.push(id);
        self.shoppers.insert(id, shopper);
        self.pending
            .push(Event::new(self.time, EventKind::EnterStore, id));
    }

    /// Every event due at or before the current second, in schedule order
    fn take_due_events(&mut self) -> Vec<Event> {
        let due = self
            .pending
            .iter()
            .take_while(|event| event.time <= self.time)
            .count();
        self.pending.drain(..due).collect()
    }

    fn dispatch(&mut self, event: &Event) -> Vec<Event> {
        let Self {
            shoppers,
            rng,
            store,
            queue,
            checkouts,
            wait_total,
            wait_count,
            ..
        } = self;
        let mut ctx = StationContext { shoppers, rng };

        match event.kind {
            EventKind::EnterStore => store.enter(&mut ctx, event),
            EventKind::EnterQueue => {
                let mut follow = release_station(store, queue, &mut ctx, event);
                follow.extend(queue.enter(&mut ctx, event));
                follow
            }
            EventKind::EnterCheckout => {
                let admitted = checkouts.free_lane().is_some();
                let mut follow = checkouts.enter(&mut ctx, event);

                if admitted {
                    follow.extend(release_station(store, queue, &mut ctx, event));
                    if let Some(wait) = ctx
                        .shoppers
                        .get(&event.shopper)
                        .and_then(|shopper| shopper.queue_wait())
                    {
                        *wait_total += wait;
                        *wait_count += 1;
                    }
                }
                follow
            }
            EventKind::ExitCheckout => checkouts.exit(&mut ctx, event),
        }
    }

    /// Advance one simulated second: admit any scheduled arrival, dispatch
    /// the due batch, then move the clock
    pub fn step(&mut self) {
        if self.finished() {
            return;
        }

        if self.time > 0 && self.time % self.config.arrival_interval == 0 {
            self.admit_shopper();
        }

        for event in self.take_due_events() {
            let follow = self.dispatch(&event);
            self.pending.extend(follow);
        }

        // Stable sort keeps same-second events in insertion order
        self.pending.sort_by_key(|event| event.time);
        self.time += 1;
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// The clock has moved past the configured horizon
    pub fn finished(&self) -> bool {
        self.time > self.config.horizon
    }

    pub fn shopper_count(&self) -> usize {
        self.arrival_order.len()
    }

    /// Mean seconds shoppers have waited in the queue before reaching a
    /// lane, over every checkout admission so far
    pub fn average_wait(&self) -> Option<f64> {
        if self.wait_count == 0 {
            None
        } else {
            Some(self.wait_total as f64 / self.wait_count as f64)
        }
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            time: self.time,
            queue_length: self.queue.len(),
            lanes_in_use: self.checkouts.occupied(),
            lane_count: self.checkouts.lane_count(),
            average_wait: self.average_wait(),
            pending_events: self.pending.len(),
            shoppers: self
                .arrival_order
                .iter()
                .filter_map(|id| self.shoppers.get(id))
                .map(ShopperData::from)
                .collect(),
        }
    }

    /// Drive the clock all the way to the horizon
    #[instrument(skip(self), fields(horizon = self.config.horizon))]
    pub fn run_to_horizon(&mut self) -> MarketSummary {
        info!(shoppers = self.arrival_order.len(), "market run starting");

        while !self.finished() {
            self.step();

            if self.time % 3600 == 0 {
                debug!(
                    time = self.time,
                    shoppers = self.arrival_order.len(),
                    waiting = self.queue.len(),
                    lanes_in_use = self.checkouts.occupied(),
                    "simulated hour elapsed"
                );
            }
        }

        let gone_home = self
            .shoppers
            .values()
            .filter(|shopper| shopper.state() == ShopperState::GoneHome)
            .count();

        let summary = MarketSummary {
            total_shoppers: self.arrival_order.len(),
            gone_home,
            average_wait: self.average_wait(),
            final_time: self.time,
        };

        info!(
            total_shoppers = summary.total_shoppers,
            gone_home = summary.gone_home,
            average_wait = ?summary.average_wait,
            "market run complete"
        );

        summary
    }
}

/// Resolve an event's release tag against the station it names
fn release_station(
    store: &mut StorePool,
    queue: &mut CheckoutQueue,
    ctx: &mut StationContext<'_>,
    event: &Event,
) -> Vec<Event> {
    match event.release {
        Some(Release::StoreFloor) => store.exit(ctx, event),
        Some(Release::QueueHead) => queue.exit(ctx, event),
        None => Vec::new(),
    }
}

/// Rendering view of the whole market after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub time: SimTime,
    pub queue_length: usize,
    pub lanes_in_use: usize,
    pub lane_count: usize,
    pub average_wait: Option<f64>,
    pub pending_events: usize,
    pub shoppers: Vec<ShopperData>,
}

/// End-of-run accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_shoppers: usize,
    pub gone_home: usize,
    pub average_wait: Option<f64>,
    pub final_time: SimTime,
}

impl Exhibit for Simulator {
    type Snapshot = MarketSnapshot;

    fn step(&mut self) {
        Simulator::step(self);
    }

    fn snapshot(&self) -> MarketSnapshot {
        Simulator::snapshot(self)
    }

    fn finished(&self) -> bool {
        Simulator::finished(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn quick_config(lanes: usize, initial: usize, seed: u64) -> MarketConfig {
        MarketConfig {
            checkout_lanes: lanes,
            initial_shoppers: initial,
            seed,
            ..MarketConfig::default()
        }
    }

    fn assert_pending_sorted(simulator: &Simulator) {
        for pair in simulator.pending.windows(2) {
            assert!(
                pair[0].time <= pair[1].time,
                "pending events out of order: {} after {}",
                pair[1].time,
                pair[0].time
            );
        }
    }

    #[test]
    fn test_opening_enqueues_the_initial_shoppers() {
        let simulator = Simulator::new(quick_config(3, 10, 1)).unwrap();
        let snapshot = simulator.snapshot();

        assert_eq!(snapshot.time, 0);
        assert_eq!(snapshot.shoppers.len(), 10);
        assert_eq!(snapshot.pending_events, 10);
        assert!(snapshot
            .shoppers
            .iter()
            .all(|shopper| shopper.state == ShopperState::Init));
    }

    #[test]
    fn test_rejects_a_market_with_no_lanes() {
        let result = Simulator::new(quick_config(0, 5, 1));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_a_zero_arrival_interval() {
        let config = MarketConfig {
            arrival_interval: 0,
            ..MarketConfig::default()
        };
        assert!(matches!(
            Simulator::new(config),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_arrivals_follow_the_interval() {
        let config = MarketConfig {
            arrival_interval: 10,
            initial_shoppers: 0,
            ..MarketConfig::default()
        };
        let mut simulator = Simulator::new(config).unwrap();

        for _ in 0..11 {
            simulator.step();
        }
        assert_eq!(simulator.shopper_count(), 1);

        for _ in 0..10 {
            simulator.step();
        }
        assert_eq!(simulator.shopper_count(), 2);
    }

    #[test]
    fn test_pending_events_stay_sorted() {
        let mut simulator = Simulator::new(quick_config(3, 10, 3)).unwrap();
        for _ in 0..500 {
            simulator.step();
            assert_pending_sorted(&simulator);
        }
    }

    #[test]
    fn test_states_only_move_forward() {
        let mut simulator = Simulator::new(quick_config(2, 8, 4)).unwrap();
        let mut seen: HashMap<ShopperId, ShopperState> = HashMap::new();

        for _ in 0..2000 {
            simulator.step();
            for shopper in simulator.shoppers.values() {
                let previous = seen.insert(shopper.id, shopper.state());
                if let Some(previous) = previous {
                    assert!(
                        shopper.state() >= previous,
                        "{:?} regressed to {:?}",
                        previous,
                        shopper.state()
                    );
                }
            }
        }
    }

    #[test]
    fn test_lane_occupancy_never_exceeds_the_pool() {
        let config = MarketConfig {
            arrival_interval: 30,
            ..quick_config(2, 20, 5)
        };
        let mut simulator = Simulator::new(config).unwrap();

        for _ in 0..3000 {
            simulator.step();
            let snapshot = simulator.snapshot();
            assert!(snapshot.lanes_in_use <= 2);

            let checking_out = snapshot
                .shoppers
                .iter()
                .filter(|shopper| shopper.state == ShopperState::CheckingOut)
                .count();
            assert_eq!(checking_out, snapshot.lanes_in_use);

            let in_queue = snapshot
                .shoppers
                .iter()
                .filter(|shopper| shopper.state == ShopperState::InQueue)
                .count();
            assert_eq!(in_queue, snapshot.queue_length);
        }
    }

    #[test]
    fn test_one_lane_serializes_checkouts() {
        let config = MarketConfig {
            horizon: 20_000,
            arrival_interval: 10_000,
            ..quick_config(1, 2, 6)
        };
        let mut simulator = Simulator::new(config).unwrap();
        simulator.run_to_horizon();

        let snapshot = simulator.snapshot();
        let mut served: Vec<&ShopperData> = snapshot
            .shoppers
            .iter()
            .filter(|shopper| shopper.entered_checkout.is_some())
            .collect();
        served.sort_by_key(|shopper| shopper.entered_checkout);

        for pair in served.windows(2) {
            let earlier_exit = pair[0].exited_checkout.expect("earlier shopper finished");
            let later_entry = pair[1].entered_checkout.unwrap();
            assert!(
                later_entry >= earlier_exit,
                "two shoppers shared the single lane"
            );
        }
    }

    #[test]
    fn test_average_wait_is_the_exact_mean() {
        let config = MarketConfig {
            horizon: 30_000,
            ..quick_config(2, 8, 7)
        };
        let mut simulator = Simulator::new(config).unwrap();
        simulator.run_to_horizon();

        let waits: Vec<SimTime> = simulator
            .shoppers
            .values()
            .filter_map(|shopper| shopper.queue_wait())
            .collect();
        assert!(!waits.is_empty(), "nobody reached a lane");

        let expected = waits.iter().sum::<SimTime>() as f64 / waits.len() as f64;
        let reported = simulator.average_wait().unwrap();
        assert!((reported - expected).abs() < 1e-9);
    }

    #[test]
    fn test_run_to_horizon_accounts_for_everyone() {
        let config = MarketConfig {
            horizon: 5_000,
            ..quick_config(2, 5, 8)
        };
        let mut simulator = Simulator::new(config.clone()).unwrap();
        let summary = simulator.run_to_horizon();

        assert_eq!(summary.final_time, config.horizon + 1);
        assert!(simulator.finished());
        assert_eq!(summary.total_shoppers, simulator.shopper_count());
        assert!(summary.gone_home >= 1, "nobody made it home");
        assert!(summary.gone_home <= summary.total_shoppers);

        // The clock stays put once the horizon has passed
        simulator.step();
        assert_eq!(simulator.time(), summary.final_time);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        fn fingerprint(snapshot: &MarketSnapshot) -> Vec<(u64, ShopperState, Option<SimTime>)> {
            snapshot
                .shoppers
                .iter()
                .map(|s| (s.items_needed, s.state, s.entered_checkout))
                .collect()
        }

        let mut first = Simulator::new(quick_config(3, 10, 9)).unwrap();
        let mut second = Simulator::new(quick_config(3, 10, 9)).unwrap();

        for _ in 0..800 {
            first.step();
            second.step();
        }

        let a = first.snapshot();
        let b = second.snapshot();
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_eq!(a.queue_length, b.queue_length);
        assert_eq!(a.lanes_in_use, b.lanes_in_use);
        assert_eq!(a.average_wait, b.average_wait);
        assert_eq!(a.pending_events, b.pending_events);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_core_invariants_hold_across_seeds(
            seed in 0u64..500,
            lanes in 1usize..4,
            initial in 0usize..12,
        ) {
            let mut simulator = Simulator::new(quick_config(lanes, initial, seed)).unwrap();

            for _ in 0..300 {
                simulator.step();
            }

            assert_pending_sorted(&simulator);

            let snapshot = simulator.snapshot();
            prop_assert!(snapshot.lanes_in_use <= lanes);

            let admitted = snapshot
                .shoppers
                .iter()
                .filter(|shopper| shopper.entered_checkout.is_some())
                .count();
            prop_assert_eq!(admitted as u64, simulator.wait_count);

            let in_queue = snapshot
                .shoppers
                .iter()
                .filter(|shopper| shopper.state == ShopperState::InQueue)
                .count();
            prop_assert_eq!(in_queue, snapshot.queue_length);
        }
    }
}
