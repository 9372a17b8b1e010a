//! Crate-wide error type.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading, validating, or solving an
/// instance.
#[derive(Debug, Error)]
pub enum Error {
    /// A fleet needs at least one vehicle.
    #[error("invalid vehicle count {0}, need at least 1")]
    InvalidVehicleCount(usize),

    /// Vehicle capacity must be positive.
    #[error("invalid vehicle capacity {0}, need at least 1")]
    InvalidVehicleCapacity(i64),

    /// The customer's window cannot contain its own service time.
    #[error(
        "customer {id} can never be serviced: ready_time {ready_time} + \
         service_time {service_time} exceeds due_time {due_time}"
    )]
    UnserviceableCustomer {
        id: usize,
        ready_time: i64,
        service_time: i64,
        due_time: i64,
    },

    /// Demand, times, and durations must be non-negative.
    #[error("customer {id} has negative {field} ({value})")]
    NegativeCustomerField {
        id: usize,
        field: &'static str,
        value: i64,
    },

    /// A distance table needs at least two distinct customers.
    #[error("customer graph needs at least 2 customers, got {0}")]
    TooFewCustomers(usize),

    /// A query used a customer whose coordinates are not in the graph.
    #[error("no customer at ({x}, {y}) in the graph")]
    CustomerNotInGraph { x: i64, y: i64 },

    /// A stop index past the end of a route.
    #[error("stop index {index} out of range for route of length {len}")]
    StopIndexOutOfRange { index: usize, len: usize },

    /// The input customer list contains no depot (id 0).
    #[error("no depot (customer 0) in the input")]
    MissingDepot,

    /// An instance file that does not follow the expected layout.
    #[error("malformed instance: {0}")]
    MalformedInstance(String),

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// File system failure while reading or writing an instance or dump.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
