//! Driven port for car persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::car::{Car, CarDraft, CarFilter, CarId};

/// Failures surfaced by [`CarRepository`] implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarRepositoryError {
    /// Could not obtain or use a database connection.
    #[error("connection failure: {message}")]
    Connection { message: String },
    /// A query failed to execute.
    #[error("query failure: {message}")]
    Query { message: String },
    /// The unique constraint on the registration number was violated.
    #[error("registration number {reg_num} already exists")]
    DuplicateRegNum { reg_num: String },
}

impl CarRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn duplicate_reg_num(reg_num: impl Into<String>) -> Self {
        Self::DuplicateRegNum {
            reg_num: reg_num.into(),
        }
    }
}

/// Persistence operations for the car catalogue.
///
/// Implementations resolve the embedded mark, model, and owner values to
/// dimension rows; callers never see dimension identifiers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Fetch a single car by identifier.
    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarRepositoryError>;

    /// List cars matching the filter, in unspecified order.
    async fn list(&self, filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError>;

    /// Persist a new car and return it with its assigned identifier.
    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError>;

    /// Replace every field of an existing car. Returns `None` when the
    /// identifier does not exist.
    async fn update(&self, id: CarId, draft: &CarDraft) -> Result<Option<Car>, CarRepositoryError>;

    /// Delete a car. Returns `false` when the identifier does not exist.
    async fn delete(&self, id: CarId) -> Result<bool, CarRepositoryError>;
}

/// Always-empty repository for wiring tests.
#[cfg(test)]
pub struct FixtureCarRepository;

#[cfg(test)]
#[async_trait]
impl CarRepository for FixtureCarRepository {
    async fn find_by_id(&self, _id: CarId) -> Result<Option<Car>, CarRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _filter: &CarFilter) -> Result<Vec<Car>, CarRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, draft: &CarDraft) -> Result<Car, CarRepositoryError> {
        Ok(draft.clone().into_car(CarId::new(1)))
    }

    async fn update(
        &self,
        _id: CarId,
        _draft: &CarDraft,
    ) -> Result<Option<Car>, CarRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: CarId) -> Result<bool, CarRepositoryError> {
        Ok(false)
    }
}
