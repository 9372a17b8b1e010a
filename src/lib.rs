//! # tw-routing
//!
//! Heuristics for the Vehicle Routing Problem with Time Windows: greedy
//! priority-insertion route construction plus a randomized merge-based
//! improvement loop that re-builds route subsets and accepts strict
//! improvements only.
//!
//! ## Modules
//!
//! - [`models`] — Customer and Route types with an injectable timing rule
//! - [`graph`] — Precomputed pairwise distance table with neighbour queries
//! - [`scheduler`] — Fleet configuration, greedy construction, merge improvement
//! - [`instance`] — Solomon-text and JSON instance loading
//! - [`solver`] — Construction-then-improvement driver and result snapshots
//! - [`error`] — Crate-wide error type
//!
//! ## Example
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tw_routing::models::Customer;
//! use tw_routing::scheduler::Fleet;
//! use tw_routing::solver::solve;
//!
//! let customers = vec![
//!     Customer::depot(35, 35, 1000).unwrap(),
//!     Customer::new(1, 41, 49, 10, 0, 500, 10).unwrap(),
//!     Customer::new(2, 22, 75, 30, 100, 600, 10).unwrap(),
//! ];
//! let fleet = Fleet::new(25, 2000).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = solve(&fleet, &customers, 100, &mut rng).unwrap();
//! assert!(report.routes.iter().all(|r| r.is_closed()));
//! ```

pub mod error;
pub mod graph;
pub mod instance;
pub mod models;
pub mod scheduler;
pub mod solver;

pub use error::{Error, Result};
