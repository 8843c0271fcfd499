//! Driving ports consumed by inbound adapters.

use async_trait::async_trait;

use crate::domain::car::{Car, CarDraft, CarFilter, CarId};
use crate::domain::error::Error;

/// Read operations over the car catalogue.
#[async_trait]
pub trait CarsQuery: Send + Sync {
    /// Fetch a single car.
    async fn get_car(&self, id: CarId) -> Result<Car, Error>;

    /// List cars matching the filter.
    async fn list_cars(&self, filter: CarFilter) -> Result<Vec<Car>, Error>;
}

/// Write operations over the car catalogue.
#[async_trait]
pub trait CarsCommand: Send + Sync {
    /// Ingest a batch of registration numbers: validate, enrich via the
    /// external lookup, deduplicate, and persist. Returns every car stored
    /// by this call, or a single error.
    async fn add_cars(&self, reg_nums: Vec<String>) -> Result<Vec<Car>, Error>;

    /// Replace every field of an existing car.
    async fn update_car(&self, id: CarId, draft: CarDraft) -> Result<Car, Error>;

    /// Delete a car.
    async fn delete_car(&self, id: CarId) -> Result<(), Error>;
}
