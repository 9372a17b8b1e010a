//! Serializable snapshots of a route set.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Route;

/// A persistable view of a route set: the customer ids of each route plus
/// the iteration count that produced it.
///
/// # Examples
///
/// ```
/// use tw_routing::models::{Customer, Route};
/// use tw_routing::solver::Snapshot;
///
/// let depot = Customer::depot(0, 0, 1000).unwrap();
/// let mut route = Route::new();
/// route.add_stop(depot.clone());
/// route.add_stop(Customer::new(1, 3, 4, 10, 0, 100, 10).unwrap());
/// route.close(&depot);
///
/// let snapshot = Snapshot::from_routes(&[route], 1);
/// assert_eq!(snapshot.routes, vec![vec![0, 1, 0]]);
/// assert_eq!(snapshot.total_cost, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Improvement iterations performed when the snapshot was taken.
    pub iterations: usize,
    /// Sum of route costs.
    pub total_cost: i64,
    /// Customer ids per route, in visit order.
    pub routes: Vec<Vec<usize>>,
}

impl Snapshot {
    /// Captures the given routes.
    pub fn from_routes(routes: &[Route], iterations: usize) -> Self {
        Self {
            iterations,
            total_cost: routes.iter().map(Route::cost).sum(),
            routes: routes
                .iter()
                .map(|r| r.stops().iter().map(|c| c.id()).collect())
                .collect(),
        }
    }
}

/// Snapshots keyed by a caller-chosen label, typically a time-budget name.
pub type Dump = BTreeMap<String, Snapshot>;

/// Writes a dump as JSON to the given path.
pub fn write_dump<P: AsRef<Path>>(path: P, dump: &Dump) -> Result<()> {
    let json = serde_json::to_string(dump)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Reads a dump previously written by [`write_dump`].
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<Dump> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn sample_routes() -> Vec<Route> {
        let depot = Customer::depot(0, 0, 10_000).expect("valid");
        let mut routes = Vec::new();
        for (id, x) in [(1, 10), (2, 20)] {
            let mut route = Route::new();
            route.add_stop(depot.clone());
            route.add_stop(Customer::new(id, x, 0, 10, 0, 5000, 10).expect("valid"));
            route.close(&depot);
            routes.push(route);
        }
        routes
    }

    #[test]
    fn test_snapshot_from_routes() {
        let snapshot = Snapshot::from_routes(&sample_routes(), 3);
        assert_eq!(snapshot.iterations, 3);
        assert_eq!(snapshot.routes, vec![vec![0, 1, 0], vec![0, 2, 0]]);
        // route costs: 10 + 10 + 10 = 30 and 20 + 10 + 20 = 50
        assert_eq!(snapshot.total_cost, 80);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let snapshot = Snapshot::from_routes(&sample_routes(), 1);
        let json = serde_json::to_string(&snapshot).expect("serializes");
        let back: Snapshot = serde_json::from_str(&json).expect("parses");
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_dump_file_round_trip() {
        let mut dump = Dump::new();
        dump.insert("5".to_string(), Snapshot::from_routes(&sample_routes(), 2));

        let path = std::env::temp_dir().join("tw_routing_dump_test.json");
        write_dump(&path, &dump).expect("writes");
        let back = read_dump(&path).expect("reads");
        std::fs::remove_file(&path).ok();

        assert_eq!(dump, back);
    }
}
