//! Discrete-event grocery checkout exhibit

pub mod event;
pub mod shopper;
pub mod simulator;
pub mod stations;

pub use event::{Event, EventKind, Release};
pub use shopper::{Shopper, ShopperData, ShopperState};
pub use simulator::{MarketSnapshot, MarketSummary, Simulator, NOTIFY_INTERVAL};
pub use stations::{
    CheckoutPool, CheckoutQueue, Station, StationContext, StorePool, CHECKOUT_PAY_TIME,
    CHECKOUT_WAIT_TIME,
};
