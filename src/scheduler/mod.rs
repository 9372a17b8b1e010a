//! Route construction and improvement over a shared fleet configuration.
//!
//! - [`Fleet`] — vehicle count and capacity consumed by both schedulers
//! - [`construct_solution`] — greedy priority-insertion construction
//! - [`merge_routes`] / [`optimize_solution`] — randomized merge-based
//!   improvement, one accept-if-better step at a time
//! - [`route_loss`] — the acceptance scoring function (lower is better)

mod fleet;
mod greedy;
mod merger;

pub use fleet::Fleet;
pub use greedy::{construct_solution, is_eligible};
pub use merger::{merge_routes, optimize_solution, route_loss};
