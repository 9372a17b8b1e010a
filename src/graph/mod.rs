//! Precomputed pairwise distances over a fixed customer set.
//!
//! - [`CustomerGraph`] — triangular Euclidean distance table plus the two
//!   neighbour queries the construction heuristics rely on

mod customer_graph;

pub use customer_graph::CustomerGraph;
