//! Domain model types for time-window vehicle routing.
//!
//! - [`Customer`] — a delivery stop with demand, time window, and service
//!   duration; id 0 ([`DEPOT_ID`]) is the depot
//! - [`Route`] — an ordered stop sequence that recomputes scheduled
//!   arrivals through an injected [`TimingFn`]

mod customer;
mod route;

pub use customer::{Customer, DEPOT_ID};
pub use route::{default_timing, rounded_distance, Route, TimingFn};
