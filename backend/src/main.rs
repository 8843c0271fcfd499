//! Service entry-point: tracing, configuration, adapters, HTTP server.

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::CarCatalogueService;
use backend::domain::ports::{CarsCommand, CarsQuery};
use backend::inbound::http::HttpState;
use backend::inbound::http::health::HealthState;
use backend::middleware::RequestLog;
use backend::outbound::lookup::HttpVehicleLookup;
use backend::outbound::persistence::{DbPool, DieselCarRepository, PoolConfig};
use backend::server::{self, config::AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = DbPool::new(
        PoolConfig::new(config.database_url.clone()).with_max_size(config.db_pool_max_size),
    )
    .await
    .map_err(io::Error::other)?;

    let lookup = HttpVehicleLookup::new(config.lookup_api_url.clone(), config.lookup_timeout)
        .map_err(io::Error::other)?;

    let service = Arc::new(CarCatalogueService::new(
        Arc::new(DieselCarRepository::new(pool)),
        Arc::new(lookup),
    ));
    let state = HttpState::new(
        Arc::clone(&service) as Arc<dyn CarsQuery>,
        service as Arc<dyn CarsCommand>,
    );

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the probes keep observing this state.
    let server_health_state = health_state.clone();
    let configure = server::configure(state, server_health_state);

    let server = HttpServer::new(move || {
        let app = App::new().wrap(RequestLog).configure(configure.clone());
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(config.bind_addr.as_str())?;

    info!(bind_addr = %config.bind_addr, "starting car catalogue service");
    health_state.mark_ready();
    server.run().await
}
