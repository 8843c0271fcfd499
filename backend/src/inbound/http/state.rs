//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CarsCommand, CarsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub cars_query: Arc<dyn CarsQuery>,
    pub cars_command: Arc<dyn CarsCommand>,
}

impl HttpState {
    pub fn new(cars_query: Arc<dyn CarsQuery>, cars_command: Arc<dyn CarsCommand>) -> Self {
        Self {
            cars_query,
            cars_command,
        }
    }
}
