//! Vehicle catalogue service.
//!
//! Hexagonal layout: `domain` holds the entities, ports, and the catalogue
//! service; `inbound` adapts HTTP requests onto the driving ports; `outbound`
//! implements the driven ports against PostgreSQL and the external
//! vehicle-info API; `middleware` carries request-lifecycle wraps; `server`
//! wires the pieces together.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
