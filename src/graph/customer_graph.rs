//! Customer graph with a precomputed triangular distance table.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::Customer;

/// Pairwise Euclidean distances between a fixed set of customers.
///
/// Customers are stored in a canonical order, sorted by coordinate pair,
/// and the distance table is keyed by that order. The table is symmetric,
/// non-negative, zero only for coincident coordinates, and read-only after
/// construction. Neighbour queries break ties by the canonical order: the
/// first minimum encountered wins.
///
/// # Examples
///
/// ```
/// use tw_routing::graph::CustomerGraph;
/// use tw_routing::models::Customer;
/// use std::collections::HashSet;
///
/// let depot = Customer::depot(0, 0, 1000).unwrap();
/// let near = Customer::new(1, 3, 4, 10, 0, 100, 5).unwrap();
/// let far = Customer::new(2, 30, 40, 10, 0, 100, 5).unwrap();
///
/// let graph = CustomerGraph::new([depot.clone(), near, far]).unwrap();
/// assert_eq!(graph.distance(&depot, &graph.customers()[1]).unwrap(), 5.0);
///
/// let nearest = graph.nearest_unvisited(&depot, &HashSet::new()).unwrap();
/// assert_eq!(nearest.unwrap().id(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CustomerGraph {
    customers: Vec<Customer>,
    positions: HashMap<(i64, i64), usize>,
    distances: Vec<f64>,
}

impl CustomerGraph {
    /// Builds a graph over the given customers.
    ///
    /// Customers are deduplicated by id (first occurrence wins) and at
    /// least two distinct customers are required.
    pub fn new<I>(customers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Customer>,
    {
        let mut seen = HashSet::new();
        let mut members: Vec<Customer> = customers
            .into_iter()
            .filter(|c| seen.insert(c.id()))
            .collect();

        if members.len() < 2 {
            return Err(Error::TooFewCustomers(members.len()));
        }

        members.sort_by_key(Customer::coords);

        let n = members.len();
        let mut positions = HashMap::with_capacity(n);
        for (i, customer) in members.iter().enumerate() {
            // Co-located customers share a table row; first one wins.
            positions.entry(customer.coords()).or_insert(i);
        }

        let mut distances = vec![0.0; n * (n - 1) / 2];
        for i in 0..n {
            for j in (i + 1)..n {
                distances[triangular_index(n, i, j)] = members[i].distance_to(&members[j]);
            }
        }

        Ok(Self {
            customers: members,
            positions,
            distances,
        })
    }

    /// The graph members in canonical (sorted-by-coordinate) order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Always `false`; a graph holds at least two customers.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Distance between two customers.
    ///
    /// Zero for coincident coordinates; otherwise a symmetric table lookup.
    /// Fails when either coordinate pair is not a graph member, which
    /// indicates the caller queried with a customer filtered out earlier.
    pub fn distance(&self, a: &Customer, b: &Customer) -> Result<f64> {
        if a.coords() == b.coords() {
            return Ok(0.0);
        }

        let i = self.position_of(a)?;
        let j = self.position_of(b)?;
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        Ok(self.distances[triangular_index(self.customers.len(), lo, hi)])
    }

    /// The member nearest to `from`, skipping excluded ids and any member
    /// at `from`'s own coordinates.
    ///
    /// Returns `Ok(None)` when every candidate is excluded.
    pub fn nearest_unvisited(
        &self,
        from: &Customer,
        exclude: &HashSet<usize>,
    ) -> Result<Option<&Customer>> {
        self.rank_unvisited(from, exclude, |_, distance| distance)
    }

    /// The member servable soonest after `from`, ranked by
    /// `max(candidate.ready_time, from.scheduled_arrival + distance)`,
    /// with the same skipping rules as [`CustomerGraph::nearest_unvisited`].
    pub fn soonest_servable_unvisited(
        &self,
        from: &Customer,
        exclude: &HashSet<usize>,
    ) -> Result<Option<&Customer>> {
        let departure = from.scheduled_arrival() as f64;
        self.rank_unvisited(from, exclude, |candidate, distance| {
            (candidate.ready_time() as f64).max(departure + distance)
        })
    }

    fn rank_unvisited(
        &self,
        from: &Customer,
        exclude: &HashSet<usize>,
        key: impl Fn(&Customer, f64) -> f64,
    ) -> Result<Option<&Customer>> {
        // Surface a lookup miss on `from` before scanning candidates.
        self.position_of(from)?;

        let mut best: Option<(&Customer, f64)> = None;
        for other in &self.customers {
            if other.coords() == from.coords() || exclude.contains(&other.id()) {
                continue;
            }
            let score = key(other, self.distance(from, other)?);
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((other, score));
            }
        }
        Ok(best.map(|(customer, _)| customer))
    }

    fn position_of(&self, customer: &Customer) -> Result<usize> {
        let (x, y) = customer.coords();
        self.positions
            .get(&(x, y))
            .copied()
            .ok_or(Error::CustomerNotInGraph { x, y })
    }
}

/// Flat index into the upper-triangular table for `i < j`.
fn triangular_index(n: usize, i: usize, j: usize) -> usize {
    i * (2 * n - i - 1) / 2 + (j - i - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: usize, x: i64, y: i64) -> Customer {
        Customer::new(id, x, y, 10, 0, 10_000, 5).expect("valid")
    }

    fn sample_graph() -> CustomerGraph {
        CustomerGraph::new([
            customer(0, 0, 0),
            customer(1, 3, 4),
            customer(2, 0, 8),
            customer(3, 6, 0),
        ])
        .expect("valid")
    }

    #[test]
    fn test_canonical_order() {
        let graph = sample_graph();
        let coords: Vec<(i64, i64)> = graph.customers().iter().map(Customer::coords).collect();
        assert_eq!(coords, vec![(0, 0), (0, 8), (3, 4), (6, 0)]);
    }

    #[test]
    fn test_distance_symmetric_and_zero_on_self() {
        let graph = sample_graph();
        let a = customer(0, 0, 0);
        let b = customer(1, 3, 4);
        assert_eq!(graph.distance(&a, &b).expect("member"), 5.0);
        assert_eq!(graph.distance(&b, &a).expect("member"), 5.0);
        assert_eq!(graph.distance(&a, &a).expect("member"), 0.0);
    }

    #[test]
    fn test_distance_missing_customer() {
        let graph = sample_graph();
        let outsider = customer(9, 99, 99);
        let err = graph
            .distance(&customer(0, 0, 0), &outsider)
            .expect_err("not a member");
        assert!(matches!(err, Error::CustomerNotInGraph { x: 99, y: 99 }));
    }

    #[test]
    fn test_too_few_customers() {
        let err = CustomerGraph::new([customer(0, 0, 0)]).expect_err("too few");
        assert!(matches!(err, Error::TooFewCustomers(1)));
    }

    #[test]
    fn test_deduplicates_by_id() {
        let graph = CustomerGraph::new([
            customer(0, 0, 0),
            customer(1, 3, 4),
            customer(1, 50, 50), // duplicate id, dropped
        ])
        .expect("valid");
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_nearest_unvisited() {
        let graph = sample_graph();
        let from = customer(0, 0, 0);

        let nearest = graph
            .nearest_unvisited(&from, &HashSet::new())
            .expect("member");
        assert_eq!(nearest.expect("candidates remain").id(), 1);

        let exclude: HashSet<usize> = [1].into();
        let nearest = graph.nearest_unvisited(&from, &exclude).expect("member");
        // remaining candidates: id 2 at distance 8, id 3 at distance 6
        assert_eq!(nearest.expect("candidates remain").id(), 3);
    }

    #[test]
    fn test_nearest_unvisited_all_excluded() {
        let graph = sample_graph();
        let exclude: HashSet<usize> = [1, 2, 3].into();
        let nearest = graph
            .nearest_unvisited(&customer(0, 0, 0), &exclude)
            .expect("member");
        assert!(nearest.is_none());
    }

    #[test]
    fn test_nearest_tie_broken_by_canonical_order() {
        let graph = CustomerGraph::new([
            customer(0, 0, 0),
            customer(1, 5, 0),
            customer(2, 0, 5), // same distance, earlier in sorted coord order
        ])
        .expect("valid");

        let nearest = graph
            .nearest_unvisited(&customer(0, 0, 0), &HashSet::new())
            .expect("member");
        assert_eq!(nearest.expect("candidates remain").id(), 2);
    }

    #[test]
    fn test_nearest_skips_colocated() {
        let graph = CustomerGraph::new([
            customer(0, 0, 0),
            customer(1, 0, 0), // shares the query coordinates
            customer(2, 9, 0),
        ])
        .expect("valid");

        let nearest = graph
            .nearest_unvisited(&customer(0, 0, 0), &HashSet::new())
            .expect("member");
        assert_eq!(nearest.expect("candidates remain").id(), 2);
    }

    #[test]
    fn test_soonest_servable_prefers_early_window() {
        // Candidate 1 is close but not ready until 100; candidate 2 is far
        // but ready immediately.
        let near_late = Customer::new(1, 1, 0, 10, 100, 1000, 5).expect("valid");
        let far_early = Customer::new(2, 50, 0, 10, 0, 1000, 5).expect("valid");
        let depot = Customer::depot(0, 0, 1000).expect("valid");

        let graph =
            CustomerGraph::new([depot.clone(), near_late, far_early]).expect("valid");

        let soonest = graph
            .soonest_servable_unvisited(&depot, &HashSet::new())
            .expect("member");
        assert_eq!(soonest.expect("candidates remain").id(), 2);
    }

    #[test]
    fn test_soonest_servable_accounts_for_departure_time() {
        let a = Customer::new(1, 10, 0, 10, 0, 1000, 5).expect("valid");
        let b = Customer::new(2, 20, 0, 10, 0, 1000, 5).expect("valid");
        let mut from = Customer::depot(0, 0, 1000).expect("valid");

        let graph = CustomerGraph::new([from.clone(), a, b]).expect("valid");

        from.set_scheduled_arrival(0);
        let soonest = graph
            .soonest_servable_unvisited(&from, &HashSet::new())
            .expect("member");
        assert_eq!(soonest.expect("candidates remain").id(), 1);
    }

    #[test]
    fn test_query_from_outsider_fails() {
        let graph = sample_graph();
        let outsider = customer(9, 99, 99);
        assert!(graph
            .nearest_unvisited(&outsider, &HashSet::new())
            .is_err());
    }
}
