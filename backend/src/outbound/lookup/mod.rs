//! Outbound adapter for the external vehicle-info API.

mod dto;
mod http_lookup;

pub use http_lookup::HttpVehicleLookup;
