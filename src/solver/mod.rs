//! End-to-end solving: greedy construction followed by a merge loop.
//!
//! - [`solve`] — runs construction, then repeated improvement steps under
//!   an iteration budget with an injected random source
//! - [`Snapshot`] / [`Dump`] — serializable views of a route set for
//!   persisting intermediate results under caller-chosen labels

mod run;
mod snapshot;

pub use run::{solve, SolveReport};
pub use snapshot::{read_dump, write_dump, Dump, Snapshot};
