//! Customer type: a delivery stop with demand, time window, and service time.

use crate::error::{Error, Result};

/// Id reserved for the depot, the fixed start and end of every route.
pub const DEPOT_ID: usize = 0;

/// A customer (or the depot) in a routing problem.
///
/// Customers carry integer coordinates, a demand, a service time window
/// `[ready_time, due_time]`, and a service duration. The `scheduled_arrival`
/// field is working state owned by the [`Route`](crate::models::Route)
/// containing the customer; it defaults to 0 and is overwritten on every
/// timing recomputation. It has no meaning outside a route.
///
/// Equality and hashing use the id alone: two `Customer` values with the
/// same id are interchangeable regardless of their other fields.
///
/// # Examples
///
/// ```
/// use tw_routing::models::Customer;
///
/// let c = Customer::new(1, 41, 49, 10, 0, 200, 10).unwrap();
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.coords(), (41, 49));
/// assert!(!c.is_depot());
///
/// // ready_time + service_time must not exceed due_time
/// assert!(Customer::new(2, 0, 0, 5, 5, 10, 10).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Customer {
    id: usize,
    x: i64,
    y: i64,
    demand: i64,
    ready_time: i64,
    due_time: i64,
    service_time: i64,
    scheduled_arrival: i64,
}

impl Customer {
    /// Creates a customer, validating its time window.
    ///
    /// Fails if `ready_time + service_time > due_time` (such a customer can
    /// never be serviced) or if demand, ready time, due time, or service
    /// time is negative.
    pub fn new(
        id: usize,
        x: i64,
        y: i64,
        demand: i64,
        ready_time: i64,
        due_time: i64,
        service_time: i64,
    ) -> Result<Self> {
        for (field, value) in [
            ("demand", demand),
            ("ready_time", ready_time),
            ("due_time", due_time),
            ("service_time", service_time),
        ] {
            if value < 0 {
                return Err(Error::NegativeCustomerField { id, field, value });
            }
        }

        if ready_time + service_time > due_time {
            return Err(Error::UnserviceableCustomer {
                id,
                ready_time,
                service_time,
                due_time,
            });
        }

        Ok(Self {
            id,
            x,
            y,
            demand,
            ready_time,
            due_time,
            service_time,
            scheduled_arrival: 0,
        })
    }

    /// Creates a depot at the given coordinates (id 0, zero demand and
    /// service time), open from time 0 until `due_time`.
    pub fn depot(x: i64, y: i64, due_time: i64) -> Result<Self> {
        Self::new(DEPOT_ID, x, y, 0, 0, due_time, 0)
    }

    /// Customer id (0 = depot).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns `true` if this customer is the depot.
    pub fn is_depot(&self) -> bool {
        self.id == DEPOT_ID
    }

    /// X-coordinate.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Coordinate pair, the key for graph membership lookups.
    pub fn coords(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// Demand at this customer.
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Earliest allowed service start.
    pub fn ready_time(&self) -> i64 {
        self.ready_time
    }

    /// Latest allowed arrival.
    pub fn due_time(&self) -> i64 {
        self.due_time
    }

    /// Service duration at this customer.
    pub fn service_time(&self) -> i64 {
        self.service_time
    }

    /// Arrival time assigned by the owning route (0 when unplaced).
    pub fn scheduled_arrival(&self) -> i64 {
        self.scheduled_arrival
    }

    /// Overwrites the scheduled arrival. Called by routes during timing
    /// recomputation.
    pub(crate) fn set_scheduled_arrival(&mut self, arrival: i64) {
        self.scheduled_arrival = arrival;
    }

    /// Euclidean distance to another customer.
    pub fn distance_to(&self, other: &Customer) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Customer {}

impl std::hash::Hash for Customer {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Customer {} @ ({}, {}) worth {}: ready at {}, due at {}, requires {}",
            self.id, self.x, self.y, self.demand, self.ready_time, self.due_time, self.service_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_customer_new() {
        let c = Customer::new(1, 10, 20, 5, 0, 100, 3).expect("valid");
        assert_eq!(c.id(), 1);
        assert_eq!(c.x(), 10);
        assert_eq!(c.y(), 20);
        assert_eq!(c.demand(), 5);
        assert_eq!(c.ready_time(), 0);
        assert_eq!(c.due_time(), 100);
        assert_eq!(c.service_time(), 3);
        assert_eq!(c.scheduled_arrival(), 0);
    }

    #[test]
    fn test_customer_depot() {
        let d = Customer::depot(35, 35, 230).expect("valid");
        assert_eq!(d.id(), DEPOT_ID);
        assert!(d.is_depot());
        assert_eq!(d.demand(), 0);
        assert_eq!(d.service_time(), 0);
        assert_eq!(d.due_time(), 230);
    }

    #[test]
    fn test_customer_unserviceable_window_rejected() {
        // ready 5 + service 10 > due 10
        let err = Customer::new(1, 0, 0, 5, 5, 10, 10).expect_err("invalid");
        assert!(matches!(err, Error::UnserviceableCustomer { id: 1, .. }));
    }

    #[test]
    fn test_customer_window_boundary_accepted() {
        // ready 5 + service 5 == due 10 is allowed
        assert!(Customer::new(1, 0, 0, 5, 5, 10, 5).is_ok());
    }

    #[test]
    fn test_customer_negative_field_rejected() {
        let err = Customer::new(1, 0, 0, -3, 0, 10, 0).expect_err("invalid");
        assert!(matches!(
            err,
            Error::NegativeCustomerField {
                field: "demand",
                value: -3,
                ..
            }
        ));
    }

    #[test]
    fn test_customer_distance() {
        let a = Customer::new(0, 0, 0, 0, 0, 100, 0).expect("valid");
        let b = Customer::new(1, 3, 4, 0, 0, 100, 0).expect("valid");
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-10);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_customer_identity_by_id() {
        let a = Customer::new(7, 0, 0, 5, 0, 100, 1).expect("valid");
        let b = Customer::new(7, 99, 99, 50, 10, 200, 2).expect("valid");
        let c = Customer::new(8, 0, 0, 5, 0, 100, 1).expect("valid");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn test_customer_scheduled_arrival_mutation() {
        let mut c = Customer::new(1, 0, 0, 5, 0, 100, 3).expect("valid");
        c.set_scheduled_arrival(42);
        assert_eq!(c.scheduled_arrival(), 42);
    }
}
