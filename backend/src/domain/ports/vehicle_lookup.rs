//! Driven port for the external registration-number lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::car::CarDraft;

/// Failure surfaced by [`VehicleLookup`] implementations.
///
/// All lookup failures (transport, status, decode) collapse into one
/// classification; callers treat the external API as opaque.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("vehicle lookup failed: {message}")]
pub struct VehicleLookupError {
    message: String,
}

impl VehicleLookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Fetch full vehicle data for a registration number from the external API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleLookup: Send + Sync {
    async fn fetch_by_reg_num(&self, reg_num: &str) -> Result<CarDraft, VehicleLookupError>;
}

/// Lookup that echoes fixed vehicle data, for wiring tests.
#[cfg(test)]
pub struct FixtureVehicleLookup;

#[cfg(test)]
#[async_trait]
impl VehicleLookup for FixtureVehicleLookup {
    async fn fetch_by_reg_num(&self, reg_num: &str) -> Result<CarDraft, VehicleLookupError> {
        Ok(CarDraft {
            reg_num: reg_num.to_owned(),
            mark: "Lada".to_owned(),
            model: "Vesta".to_owned(),
            year: 2002,
            owner: crate::domain::car::Owner {
                name: "Ivan".to_owned(),
                surname: "Ivanov".to_owned(),
                patronymic: "Ivanovich".to_owned(),
            },
        })
    }
}
