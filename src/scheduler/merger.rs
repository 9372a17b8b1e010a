//! Merge-based improvement loop over an existing route set.
//!
//! # Algorithm
//!
//! A single improvement step draws a uniformly random subset of routes,
//! pools their customers, and rebuilds the subset from scratch with the
//! same extension loop as the greedy constructor (only the priority order
//! differs: earliest-ready first). The rebuild is accepted only when it
//! strictly lowers the loss function, which is dominated by route count
//! and tie-broken by how balanced the route durations are. Callers repeat
//! the step under their own iteration or time budget.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::CustomerGraph;
use crate::models::{Customer, Route};
use crate::scheduler::greedy::build_routes;
use crate::scheduler::Fleet;

/// Weight that makes route count dominate the duration-balance term.
const ROUTE_COUNT_WEIGHT: i64 = 1_000_000;

/// Loss of a route set: lower is better.
///
/// `1_000_000 × route_count − Σ |cost(route_i) − cost(route_{i−1})|`:
/// fewer routes always wins; among equal counts, larger spread between
/// consecutive route durations lowers the loss.
pub fn route_loss(routes: &[Route]) -> i64 {
    let spread: i64 = routes
        .windows(2)
        .map(|pair| (pair[1].cost() - pair[0].cost()).abs())
        .sum();
    routes.len() as i64 * ROUTE_COUNT_WEIGHT - spread
}

/// Rebuilds the given routes from their pooled customers and returns the
/// rebuild only if it strictly improves the loss.
///
/// Customers are deduplicated by id (the depot enters the pool once) and
/// re-inserted in `(ready_time, due_time, demand)` order through the same
/// greedy extension loop as construction. `Ok(None)` means "no
/// improvement", the normal outcome of most attempts.
pub fn merge_routes(fleet: &Fleet, routes: &[Route]) -> Result<Option<Vec<Route>>> {
    let original_loss = route_loss(routes);

    let depot = routes
        .iter()
        .flat_map(Route::stops)
        .find(|c| c.is_depot())
        .cloned()
        .ok_or(Error::MissingDepot)?;

    let mut seen = HashSet::new();
    let mut pool: Vec<Customer> = Vec::new();
    for route in routes {
        for stop in route.stops() {
            if seen.insert(stop.id()) {
                pool.push(stop.clone());
            }
        }
    }

    let graph = CustomerGraph::new(pool.iter().cloned())?;

    let mut pick_order: Vec<Customer> = pool.into_iter().filter(|c| !c.is_depot()).collect();
    pick_order.sort_by_key(|c| (c.ready_time(), c.due_time(), c.demand(), c.id()));

    let rebuilt = build_routes(fleet, &depot, &graph, &pick_order)?;

    if route_loss(&rebuilt) < original_loss {
        Ok(Some(rebuilt))
    } else {
        Ok(None)
    }
}

/// One stochastic improvement step: merge a random subset of routes.
///
/// Draws a uniform subset size `k` in `[2, cap]` and a uniform size-`k`
/// subset of route indices, then attempts [`merge_routes`] on it. On
/// success the merged routes come first, followed by the untouched routes
/// in their original order. `max_selected_routes` caps the subset size;
/// `None` or `Some(0)` means every route is eligible, other values are
/// clamped into `[2, routes.len()]`.
///
/// Returns `Ok(None)` without drawing when fewer than two routes exist,
/// and `Ok(None)` when the merge does not improve.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use tw_routing::models::Customer;
/// use tw_routing::scheduler::{construct_solution, optimize_solution, Fleet};
///
/// let customers = vec![
///     Customer::depot(0, 0, 1000).unwrap(),
///     Customer::new(1, 10, 0, 10, 0, 500, 10).unwrap(),
/// ];
/// let fleet = Fleet::new(5, 1000).unwrap();
/// let routes = construct_solution(&fleet, &customers).unwrap();
///
/// // A single route cannot be merged further.
/// let mut rng = StdRng::seed_from_u64(7);
/// let step = optimize_solution(&fleet, &routes, None, &mut rng).unwrap();
/// assert!(step.is_none());
/// ```
pub fn optimize_solution<R: Rng + ?Sized>(
    fleet: &Fleet,
    routes: &[Route],
    max_selected_routes: Option<usize>,
    rng: &mut R,
) -> Result<Option<Vec<Route>>> {
    if routes.len() < 2 {
        return Ok(None);
    }

    let cap = match max_selected_routes {
        None | Some(0) => routes.len(),
        Some(max) => max.clamp(2, routes.len()),
    };

    let k = rng.random_range(2..=cap);
    let mut selected_flags = vec![false; routes.len()];
    for idx in rand::seq::index::sample(rng, routes.len(), k) {
        selected_flags[idx] = true;
    }

    let mut selected = Vec::with_capacity(k);
    let mut others = Vec::with_capacity(routes.len() - k);
    for (route, &flag) in routes.iter().zip(&selected_flags) {
        if flag {
            selected.push(route.clone());
        } else {
            others.push(route.clone());
        }
    }

    match merge_routes(fleet, &selected)? {
        Some(mut merged) => {
            log::debug!(
                "merge accepted: {} route(s) rebuilt into {}",
                selected.len(),
                merged.len()
            );
            merged.append(&mut others);
            Ok(Some(merged))
        }
        None => Ok(None),
    }
}
