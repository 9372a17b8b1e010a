//! Greedy priority-insertion construction heuristic.
//!
//! # Algorithm
//!
//! Customers that can never complete a round trip before the depot closes
//! are filtered out. The remainder are ordered by urgency (earliest due
//! time, then latest possible start, then largest demand). Routes are
//! opened one at a time and extended greedily: at every step the next
//! customer in priority order competes with the nearest feasible neighbour
//! of the route's last stop, and the winner is appended. A route closes
//! when neither candidate fits; construction stops early when a freshly
//! opened route cannot take a single customer.
//!
//! # Complexity
//!
//! O(n²) per route extension pass where n = number of eligible customers.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::graph::CustomerGraph;
use crate::models::{rounded_distance, Customer, Route};
use crate::scheduler::Fleet;

/// Earliest time a customer can be done: window opening plus service time.
fn first_time_when_done(customer: &Customer) -> i64 {
    customer.ready_time() + customer.service_time()
}

/// Returns `true` if the customer's best-case round trip can finish before
/// the depot closes. Ineligible customers are permanently unroutable.
pub fn is_eligible(customer: &Customer, depot: &Customer) -> bool {
    first_time_when_done(customer) + rounded_distance(customer, depot) <= depot.due_time()
}

/// Constructs an initial feasible route set from scratch.
///
/// The input must contain the depot (customer 0), whose time window bounds
/// the operating horizon of every route. Customers left over once the
/// priority order is exhausted, and customers excluded by the eligibility
/// filter, simply do not appear in any route.
///
/// A construction stall (a fresh route that cannot take any customer) is a
/// soft failure: it is logged and whatever complete routes exist are
/// returned.
///
/// # Examples
///
/// ```
/// use tw_routing::models::Customer;
/// use tw_routing::scheduler::{construct_solution, Fleet};
///
/// let customers = vec![
///     Customer::depot(0, 0, 1000).unwrap(),
///     Customer::new(1, 10, 0, 10, 0, 200, 10).unwrap(),
///     Customer::new(2, 20, 0, 10, 0, 300, 10).unwrap(),
/// ];
/// let fleet = Fleet::new(5, 1000).unwrap();
///
/// let routes = construct_solution(&fleet, &customers).unwrap();
/// assert_eq!(routes.len(), 1);
/// assert!(routes[0].is_closed());
/// ```
pub fn construct_solution(fleet: &Fleet, customers: &[Customer]) -> Result<Vec<Route>> {
    let depot = customers
        .iter()
        .find(|c| c.is_depot())
        .ok_or(Error::MissingDepot)?
        .clone();

    let mut seen = HashSet::new();
    let eligible: Vec<Customer> = customers
        .iter()
        .filter(|c| seen.insert(c.id()) && is_eligible(c, &depot))
        .cloned()
        .collect();

    let graph = CustomerGraph::new(eligible.iter().cloned())?;

    // Urgency first, then latest possible start, then largest demand so the
    // hard-to-place customers are attempted early. Id settles full ties.
    let mut pick_order: Vec<Customer> = eligible.into_iter().filter(|c| !c.is_depot()).collect();
    pick_order.sort_by_key(|c| {
        (
            c.due_time(),
            c.ready_time() - c.service_time(),
            std::cmp::Reverse(c.demand()),
            c.id(),
        )
    });

    build_routes(fleet, &depot, &graph, &pick_order)
}

/// The route extension loop shared by greedy construction and the merge
/// rebuild; only the pick order differs between the two.
pub(crate) fn build_routes(
    fleet: &Fleet,
    depot: &Customer,
    graph: &CustomerGraph,
    pick_order: &[Customer],
) -> Result<Vec<Route>> {
    let mut visited: HashSet<usize> = HashSet::from([depot.id()]);
    let mut routes = Vec::new();
    let mut index = 0;

    while index < pick_order.len() {
        if visited.contains(&pick_order[index].id()) {
            index += 1;
            continue;
        }

        let mut route = Route::new();
        route.add_stop(depot.clone());

        while index < pick_order.len() {
            if visited.contains(&pick_order[index].id()) {
                index += 1;
                continue;
            }

            let first = &pick_order[index];
            let Some(chosen) = select_extension(fleet, depot, graph, &route, first, &visited)?
            else {
                break;
            };

            visited.insert(chosen.id());
            route.add_stop(chosen);
        }

        if route.len() == 1 {
            // Fresh route took no customer: soft stall, keep what we have.
            log::warn!(
                "greedy construction stalled before placing a customer; \
                 returning {} completed route(s)",
                routes.len()
            );
            break;
        }

        route.close(depot);
        routes.push(route);
    }

    Ok(routes)
}

/// Picks the customer to append next, or `None` if the route must close.
///
/// Two candidates compete: the next customer in priority order ("first")
/// and the nearest viable neighbour of the route's last stop. When both
/// fit, the nearest wins only if it carries more demand than first AND
/// serving it still leaves first reachable within its window.
fn select_extension(
    fleet: &Fleet,
    depot: &Customer,
    graph: &CustomerGraph,
    route: &Route,
    first: &Customer,
    visited: &HashSet<usize>,
) -> Result<Option<Customer>> {
    let Some(last) = route.last() else {
        return Ok(None);
    };

    // Remaining capacity is budgeted against the route's elapsed time, not
    // cumulative load.
    let budget = fleet.vehicle_capacity() - route.cost();
    let nearest = nearest_viable(budget, last, graph, visited)?;

    let route_start = last.scheduled_arrival() + last.service_time();
    let first_time = route_start + rounded_distance(last, first);
    let first_end = first_time + first.service_time() + rounded_distance(first, depot);
    let first_viable =
        first_time <= first.due_time() && first.demand() <= budget && first_end <= depot.due_time();

    let chosen = match nearest {
        None => first_viable.then(|| first.clone()),
        Some(nearest) => {
            let nearest_time = route_start + rounded_distance(last, &nearest);
            let nearest_end =
                nearest_time + nearest.service_time() + rounded_distance(&nearest, depot);
            let nearest_returns = nearest_end <= depot.due_time();

            if !first_viable {
                // Window, demand, and return-trip checks for nearest happen
                // in the search; only the depot return remains.
                nearest_returns.then_some(nearest)
            } else if !nearest_returns {
                Some(first.clone())
            } else if nearest.demand() > first.demand() && nearest_end <= first.due_time() {
                // Take the bigger load now, but only if the urgent customer
                // can still be served afterwards.
                Some(nearest)
            } else {
                Some(first.clone())
            }
        }
    };

    Ok(chosen)
}

/// Nearest graph neighbour of `last` that respects its own time window and
/// the remaining capacity budget. Candidates failing either check are
/// skipped and the search continues outward.
fn nearest_viable(
    budget: i64,
    last: &Customer,
    graph: &CustomerGraph,
    visited: &HashSet<usize>,
) -> Result<Option<Customer>> {
    let mut ignore = visited.clone();
    let base_time = last.scheduled_arrival() + last.service_time();

    loop {
        let Some(candidate) = graph.nearest_unvisited(last, &ignore)? else {
            return Ok(None);
        };

        let arrival = base_time + rounded_distance(last, candidate);
        if arrival > candidate.due_time() || candidate.demand() > budget {
            ignore.insert(candidate.id());
        } else {
            return Ok(Some(candidate.clone()));
        }
    }
}
