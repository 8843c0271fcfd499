//! Outbound adapters implementing the domain's driven ports.

pub mod lookup;
pub mod persistence;
