//! Route type: an ordered stop sequence with incremental time propagation.

use crate::error::{Error, Result};
use crate::models::Customer;

/// Timing rule: computes a stop's scheduled arrival from its predecessor
/// (or `None` for the first stop).
///
/// Injected into [`Route`] at construction so alternative propagation rules
/// can be tested without touching the route itself.
pub type TimingFn = fn(Option<&Customer>, &Customer) -> i64;

/// Integer travel time between two customers: the Euclidean distance
/// rounded up to the next whole unit.
///
/// The added 0.1 keeps an exact integer distance from flipping down when
/// the float representation lands a hair below it.
pub fn rounded_distance(a: &Customer, b: &Customer) -> i64 {
    (a.distance_to(b).ceil() + 0.1) as i64
}

/// Default timing rule: a stop is reached once its predecessor has been
/// serviced and the (rounded) travel time has elapsed. The first stop is
/// scheduled at time 0.
///
/// Arrival may precede the stop's ready time; feasibility against the time
/// window is the scheduler's concern, not the route's.
pub fn default_timing(previous: Option<&Customer>, current: &Customer) -> i64 {
    match previous {
        None => 0,
        Some(prev) => {
            prev.scheduled_arrival() + prev.service_time() + rounded_distance(prev, current)
        }
    }
}

/// An ordered sequence of customer stops assigned to one vehicle.
///
/// A complete route begins at the depot and, once closed, ends there too.
/// Every structural change (append, insert, remove) recomputes the
/// scheduled arrival of each stop from the mutation point forward using the
/// route's timing rule.
///
/// Two routes are equal when they visit the same customer ids in the same
/// order; scheduled arrivals do not participate in equality.
///
/// # Examples
///
/// ```
/// use tw_routing::models::{Customer, Route};
///
/// let depot = Customer::depot(0, 0, 1000).unwrap();
/// let c = Customer::new(1, 3, 4, 10, 0, 100, 10).unwrap();
///
/// let mut route = Route::new();
/// route.add_stop(depot.clone());
/// route.add_stop(c);
/// route.close(&depot);
///
/// // depot(0) -> customer arrives at 5 -> depot again at 5 + 10 + 5
/// assert_eq!(route.stops()[1].scheduled_arrival(), 5);
/// assert_eq!(route.cost(), 20);
/// assert!(route.is_closed());
/// ```
#[derive(Clone)]
pub struct Route {
    stops: Vec<Customer>,
    timing: TimingFn,
}

impl Route {
    /// Creates an empty route using [`default_timing`].
    pub fn new() -> Self {
        Self::with_timing(default_timing)
    }

    /// Creates an empty route with a custom timing rule.
    pub fn with_timing(timing: TimingFn) -> Self {
        Self {
            stops: Vec::new(),
            timing,
        }
    }

    /// Appends a stop, scheduling it from the current last stop.
    pub fn add_stop(&mut self, mut customer: Customer) {
        let arrival = (self.timing)(self.stops.last(), &customer);
        customer.set_scheduled_arrival(arrival);
        self.stops.push(customer);
    }

    /// Inserts a stop before `index`, then recomputes arrivals from `index`
    /// onward. `index == len` is equivalent to [`Route::add_stop`].
    pub fn insert_stop(&mut self, customer: Customer, index: usize) -> Result<()> {
        if index > self.stops.len() {
            return Err(Error::StopIndexOutOfRange {
                index,
                len: self.stops.len(),
            });
        }
        if index == self.stops.len() {
            self.add_stop(customer);
            return Ok(());
        }

        self.stops.insert(index, customer);
        self.recompute_from(index);
        Ok(())
    }

    /// Removes the stop at `index`, recomputing arrivals for the remainder.
    pub fn remove_stop(&mut self, index: usize) -> Result<Customer> {
        if index >= self.stops.len() {
            return Err(Error::StopIndexOutOfRange {
                index,
                len: self.stops.len(),
            });
        }

        let removed = self.stops.remove(index);
        self.recompute_from(index);
        Ok(removed)
    }

    /// Removes and returns the last stop, if any. No recomputation is
    /// needed since only downstream stops depend on an earlier one.
    pub fn pop_stop(&mut self) -> Option<Customer> {
        self.stops.pop()
    }

    /// Appends the depot unless the route already ends with it.
    pub fn close(&mut self, depot: &Customer) {
        if self.stops.last().is_some_and(|c| c.id() == depot.id()) {
            return;
        }
        self.add_stop(depot.clone());
    }

    /// Returns `true` once the route has returned to the depot.
    pub fn is_closed(&self) -> bool {
        self.stops.len() >= 2 && self.stops.last().is_some_and(Customer::is_depot)
    }

    /// Total elapsed time: the last stop's arrival plus its service time.
    /// Zero for an empty route.
    pub fn cost(&self) -> i64 {
        self.stops
            .last()
            .map(|c| c.scheduled_arrival() + c.service_time())
            .unwrap_or(0)
    }

    /// The stops in visit order.
    pub fn stops(&self) -> &[Customer] {
        &self.stops
    }

    /// The last stop, if any.
    pub fn last(&self) -> Option<&Customer> {
        self.stops.last()
    }

    /// Number of stops, depot entries included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    fn recompute_from(&mut self, start: usize) {
        for i in start..self.stops.len() {
            let arrival = if i == 0 {
                (self.timing)(None, &self.stops[0])
            } else {
                let (head, tail) = self.stops.split_at_mut(i);
                (self.timing)(Some(&head[i - 1]), &tail[0])
            };
            self.stops[i].set_scheduled_arrival(arrival);
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.stops.len() == other.stops.len()
            && self
                .stops
                .iter()
                .zip(other.stops.iter())
                .all(|(a, b)| a.id() == b.id())
    }
}

impl Eq for Route {}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route").field("stops", &self.stops).finish()
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for stop in &self.stops {
            if !first {
                write!(f, "->")?;
            }
            write!(f, "{}({})", stop.id(), stop.scheduled_arrival())?;
            first = false;
        }
        Ok(())
    }
}
