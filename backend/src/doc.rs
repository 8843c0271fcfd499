//! OpenAPI document assembled from the handler annotations.

use utoipa::OpenApi;

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::cars::{
    AddCarsRequest, CarData, CarEnvelope, CarPayload, CarsEnvelope, OwnerData,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::cars::get_car,
        crate::inbound::http::cars::list_cars,
        crate::inbound::http::cars::add_cars,
        crate::inbound::http::cars::update_car,
        crate::inbound::http::cars::delete_car,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AddCarsRequest,
        CarData,
        CarEnvelope,
        CarPayload,
        CarsEnvelope,
        Error,
        ErrorCode,
        OwnerData,
    )),
    tags(
        (name = "cars", description = "Vehicle catalogue operations"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;
