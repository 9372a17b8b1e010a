//! The construction-then-improvement driver loop.

use rand::Rng;

use crate::error::Result;
use crate::models::{Customer, Route};
use crate::scheduler::{construct_solution, optimize_solution, Fleet};

/// Outcome of a [`solve`] run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The final accepted route set.
    pub routes: Vec<Route>,
    /// Improvement iterations performed (construction counts as one).
    pub iterations: usize,
}

/// Builds an initial solution and improves it for `max_iterations` merge
/// steps.
///
/// The subset-size cap fed into each improvement step grows with
/// consecutive non-improving attempts and resets whenever the route count
/// drops, so stagnation widens the search while progress keeps it local.
/// The random source is caller-supplied for reproducibility.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use tw_routing::models::Customer;
/// use tw_routing::scheduler::Fleet;
/// use tw_routing::solver::solve;
///
/// let customers = vec![
///     Customer::depot(0, 0, 1000).unwrap(),
///     Customer::new(1, 10, 0, 10, 0, 500, 10).unwrap(),
///     Customer::new(2, 20, 0, 10, 0, 500, 10).unwrap(),
/// ];
/// let fleet = Fleet::new(5, 1000).unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
///
/// let report = solve(&fleet, &customers, 20, &mut rng).unwrap();
/// assert!(!report.routes.is_empty());
/// ```
pub fn solve<R: Rng + ?Sized>(
    fleet: &Fleet,
    customers: &[Customer],
    max_iterations: usize,
    rng: &mut R,
) -> Result<SolveReport> {
    let mut routes = construct_solution(fleet, customers)?;
    log::debug!("greedy construction produced {} route(s)", routes.len());

    let mut iterations = 1;
    let mut no_change = 0usize;

    for _ in 0..max_iterations {
        match optimize_solution(fleet, &routes, Some(no_change), rng)? {
            Some(new_routes) => {
                if new_routes.len() < routes.len() {
                    no_change = 0;
                } else {
                    no_change += 1;
                }
                log::debug!(
                    "merge step accepted: {} -> {} route(s)",
                    routes.len(),
                    new_routes.len()
                );
                routes = new_routes;
            }
            None => no_change += 1,
        }
        iterations += 1;
    }

    Ok(SolveReport { routes, iterations })
}
