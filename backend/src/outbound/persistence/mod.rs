//! Diesel-backed persistence adapter for the car catalogue.

mod diesel_car_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_car_repository::DieselCarRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
