//! Domain layer: entities, validation, ports, and the catalogue service.

pub mod car;
mod catalogue_service;
pub mod error;
pub mod ports;
pub mod validation;

pub use car::{Car, CarDraft, CarFilter, CarId, Owner};
pub use catalogue_service::CarCatalogueService;
pub use error::{Error, ErrorCode};
