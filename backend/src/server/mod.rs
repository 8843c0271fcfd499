//! HTTP server wiring: route registration and extractor error handling.

pub mod config;

use actix_web::web;

use crate::domain::Error;
use crate::inbound::http::health::{self, HealthState};
use crate::inbound::http::{HttpState, cars};

/// Build the app configuration closure registering every route and the
/// extractor error handlers.
///
/// Shared between `main` and the endpoint tests so both serve the exact same
/// surface.
pub fn configure(
    state: HttpState,
    health_state: web::Data<HealthState>,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg| {
        cfg.app_data(web::Data::new(state.clone()))
            .app_data(health_state.clone())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(query_config())
            .service(
                web::scope("/api/v1")
                    .service(cars::list_cars)
                    .service(cars::add_cars)
                    .service(cars::get_car)
                    .service(cars::update_car)
                    .service(cars::delete_car),
            )
            .service(health::ready)
            .service(health::live);
    }
}

/// Malformed JSON bodies become invalid-input errors in the envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_input(err.to_string()).into())
}

/// Non-numeric path identifiers become invalid-input errors in the envelope.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| Error::invalid_input(err.to_string()).into())
}

/// Untypable query parameters become invalid-input errors in the envelope.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_input(err.to_string()).into())
}
