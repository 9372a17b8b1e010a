//! Problem instance loading.
//!
//! Bridges serialized VRPTW instances (Solomon-style text or JSON) into
//! the in-memory input contract of the schedulers: a validated customer
//! list plus fleet parameters. The schedulers themselves never touch a
//! file format.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Customer;
use crate::scheduler::Fleet;

/// Fleet parameters as they appear in an instance file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Number of vehicles available.
    pub number: usize,
    /// Capacity of each vehicle.
    pub capacity: i64,
}

/// A raw customer row, unvalidated. Row 0 is the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Customer id (0 = depot).
    pub id: usize,
    /// X-coordinate.
    pub x: i64,
    /// Y-coordinate.
    pub y: i64,
    /// Demand.
    pub demand: i64,
    /// Earliest service start.
    pub ready_time: i64,
    /// Latest arrival.
    pub due_time: i64,
    /// Service duration.
    pub service_time: i64,
}

/// A parsed problem instance: vehicle parameters plus customer rows.
///
/// # Examples
///
/// ```
/// use tw_routing::instance::Instance;
///
/// let text = "\
/// R101
///
/// VEHICLE
/// NUMBER     CAPACITY
///   25         200
///
/// CUSTOMER
/// CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE TIME
///
///     0      35         35          0          0       230          0
///     1      41         49         10        161       171         10
/// ";
///
/// let instance = Instance::from_solomon(text).unwrap();
/// assert_eq!(instance.vehicle.number, 25);
/// assert_eq!(instance.customers.len(), 2);
///
/// let customers = instance.customers().unwrap();
/// assert!(customers[0].is_depot());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Fleet parameters.
    pub vehicle: VehicleSpec,
    /// Customer rows, depot included.
    pub customers: Vec<CustomerRecord>,
}

impl Instance {
    /// Parses a JSON instance.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this instance as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a Solomon-style text instance.
    ///
    /// The layout is a `VEHICLE` section whose first two-integer line gives
    /// vehicle number and capacity, followed by a `CUSTOMER` section whose
    /// seven-integer lines are customer rows. Header and blank lines are
    /// skipped.
    pub fn from_solomon(text: &str) -> Result<Self> {
        let mut vehicle: Option<VehicleSpec> = None;
        let mut customers = Vec::new();
        let mut in_customers = false;

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("customer") {
                in_customers = true;
                continue;
            }

            let fields: Option<Vec<i64>> = line
                .split_whitespace()
                .map(|tok| tok.parse::<i64>().ok())
                .collect();
            let Some(fields) = fields else {
                continue; // section marker or column header
            };

            if !in_customers {
                if vehicle.is_none() && fields.len() == 2 {
                    vehicle = Some(VehicleSpec {
                        number: usize::try_from(fields[0]).map_err(|_| {
                            Error::MalformedInstance(format!(
                                "vehicle number {} is negative",
                                fields[0]
                            ))
                        })?,
                        capacity: fields[1],
                    });
                }
                continue;
            }

            if fields.len() != 7 {
                return Err(Error::MalformedInstance(format!(
                    "expected 7 customer fields, got {}: {line:?}",
                    fields.len()
                )));
            }

            customers.push(CustomerRecord {
                id: usize::try_from(fields[0]).map_err(|_| {
                    Error::MalformedInstance(format!("customer id {} is negative", fields[0]))
                })?,
                x: fields[1],
                y: fields[2],
                demand: fields[3],
                ready_time: fields[4],
                due_time: fields[5],
                service_time: fields[6],
            });
        }

        let vehicle = vehicle
            .ok_or_else(|| Error::MalformedInstance("no vehicle line found".to_string()))?;
        if customers.is_empty() {
            return Err(Error::MalformedInstance(
                "no customer rows found".to_string(),
            ));
        }

        Ok(Self { vehicle, customers })
    }

    /// Loads an instance from a `.txt` (Solomon) or `.json` file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("txt") => Self::from_solomon(&text),
            Some("json") => Self::from_json(&text),
            other => Err(Error::MalformedInstance(format!(
                "expected a .txt or .json instance, got extension {other:?}"
            ))),
        }
    }

    /// Fleet configuration from the vehicle parameters.
    pub fn fleet(&self) -> Result<Fleet> {
        Fleet::new(self.vehicle.number, self.vehicle.capacity)
    }

    /// Validated customers, surfacing any impossible time window.
    pub fn customers(&self) -> Result<Vec<Customer>> {
        self.customers
            .iter()
            .map(|r| {
                Customer::new(
                    r.id,
                    r.x,
                    r.y,
                    r.demand,
                    r.ready_time,
                    r.due_time,
                    r.service_time,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
C101

VEHICLE
NUMBER     CAPACITY
  25         200

CUSTOMER
CUST NO.  XCOORD.   YCOORD.    DEMAND   READY TIME  DUE DATE   SERVICE TIME

    0      40         50          0          0      1236          0
    1      45         68         10        912       967         90
    2      45         70         30        825       870         90
";

    #[test]
    fn test_from_solomon() {
        let instance = Instance::from_solomon(SAMPLE).expect("parses");
        assert_eq!(
            instance.vehicle,
            VehicleSpec {
                number: 25,
                capacity: 200
            }
        );
        assert_eq!(instance.customers.len(), 3);
        assert_eq!(
            instance.customers[1],
            CustomerRecord {
                id: 1,
                x: 45,
                y: 68,
                demand: 10,
                ready_time: 912,
                due_time: 967,
                service_time: 90,
            }
        );
    }

    #[test]
    fn test_from_solomon_missing_vehicle() {
        let err = Instance::from_solomon("CUSTOMER\n0 0 0 0 0 10 0\n").expect_err("invalid");
        assert!(matches!(err, Error::MalformedInstance(_)));
    }

    #[test]
    fn test_from_solomon_short_row() {
        let text = "VEHICLE\n5 100\nCUSTOMER\n0 0 0 0 10\n";
        let err = Instance::from_solomon(text).expect_err("invalid");
        assert!(matches!(err, Error::MalformedInstance(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let instance = Instance::from_solomon(SAMPLE).expect("parses");
        let json = instance.to_json().expect("serializes");
        let back = Instance::from_json(&json).expect("parses");
        assert_eq!(instance, back);
    }

    #[test]
    fn test_fleet_and_customers() {
        let instance = Instance::from_solomon(SAMPLE).expect("parses");
        let fleet = instance.fleet().expect("valid");
        assert_eq!(fleet.vehicle_capacity(), 200);

        let customers = instance.customers().expect("valid");
        assert_eq!(customers.len(), 3);
        assert!(customers[0].is_depot());
        assert_eq!(customers[2].ready_time(), 825);
    }

    #[test]
    fn test_customers_surface_invalid_window() {
        let mut instance = Instance::from_solomon(SAMPLE).expect("parses");
        instance.customers[1].due_time = instance.customers[1].ready_time;
        let err = instance.customers().expect_err("invalid window");
        assert!(matches!(err, Error::UnserviceableCustomer { id: 1, .. }));
    }
}
