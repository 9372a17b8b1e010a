//! Fleet configuration shared by the construction and merge schedulers.

use crate::error::{Error, Result};

/// Vehicle fleet parameters: how many vehicles exist and how much each can
/// carry.
///
/// Both schedulers consume the same configuration; there is no scheduler
/// hierarchy, only this struct plus the free functions in
/// [`scheduler`](crate::scheduler).
///
/// # Examples
///
/// ```
/// use tw_routing::scheduler::Fleet;
///
/// let fleet = Fleet::new(25, 200).unwrap();
/// assert_eq!(fleet.n_vehicles(), 25);
/// assert_eq!(fleet.vehicle_capacity(), 200);
///
/// assert!(Fleet::new(0, 200).is_err());
/// assert!(Fleet::new(25, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    n_vehicles: usize,
    vehicle_capacity: i64,
}

impl Fleet {
    /// Creates a fleet configuration. Both values must be at least 1.
    pub fn new(n_vehicles: usize, vehicle_capacity: i64) -> Result<Self> {
        if n_vehicles < 1 {
            return Err(Error::InvalidVehicleCount(n_vehicles));
        }
        if vehicle_capacity < 1 {
            return Err(Error::InvalidVehicleCapacity(vehicle_capacity));
        }
        Ok(Self {
            n_vehicles,
            vehicle_capacity,
        })
    }

    /// Number of vehicles in the fleet.
    pub fn n_vehicles(&self) -> usize {
        self.n_vehicles
    }

    /// Capacity budget per vehicle.
    pub fn vehicle_capacity(&self) -> i64 {
        self.vehicle_capacity
    }
}
