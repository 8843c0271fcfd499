//! HTTP adapter: handlers, DTOs, and error mapping for the REST surface.

pub mod cars;
pub mod error;
pub mod health;
pub mod state;

pub use state::HttpState;
