//! Port traits decoupling the domain from adapters.
//!
//! Driven ports ([`CarRepository`], [`VehicleLookup`]) are implemented by
//! outbound adapters; driving ports ([`CarsQuery`], [`CarsCommand`]) are
//! implemented by the domain service and consumed by the HTTP adapter.

mod car_repository;
mod cars;
mod vehicle_lookup;

pub use car_repository::{CarRepository, CarRepositoryError};
pub use cars::{CarsCommand, CarsQuery};
pub use vehicle_lookup::{VehicleLookup, VehicleLookupError};

#[cfg(test)]
pub use car_repository::{FixtureCarRepository, MockCarRepository};
#[cfg(test)]
pub use vehicle_lookup::{FixtureVehicleLookup, MockVehicleLookup};
