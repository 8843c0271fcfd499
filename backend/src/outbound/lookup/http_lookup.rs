//! Reqwest-backed vehicle lookup adapter.
//!
//! This adapter owns transport details only: request construction, timeout
//! and HTTP error mapping, and JSON decoding into the domain draft. Every
//! failure shape collapses into the port's single lookup-failure
//! classification; callers cannot tell a network failure from a bad payload.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::VehicleInfoDto;
use crate::domain::car::CarDraft;
use crate::domain::ports::{VehicleLookup, VehicleLookupError};

/// Vehicle lookup adapter that issues one GET per registration number.
pub struct HttpVehicleLookup {
    client: Client,
    endpoint: Url,
}

impl HttpVehicleLookup {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl VehicleLookup for HttpVehicleLookup {
    async fn fetch_by_reg_num(&self, reg_num: &str) -> Result<CarDraft, VehicleLookupError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("regNum", reg_num)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_vehicle(body.as_ref())
    }
}

fn parse_vehicle(body: &[u8]) -> Result<CarDraft, VehicleLookupError> {
    let decoded: VehicleInfoDto = serde_json::from_slice(body).map_err(|error| {
        VehicleLookupError::new(format!("invalid vehicle-info JSON payload: {error}"))
    })?;
    Ok(decoded.into_domain())
}

fn map_transport_error(error: reqwest::Error) -> VehicleLookupError {
    VehicleLookupError::new(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> VehicleLookupError {
    let preview = body_preview(body);
    if preview.is_empty() {
        VehicleLookupError::new(format!("status {}", status.as_u16()))
    } else {
        VehicleLookupError::new(format!("status {}: {}", status.as_u16(), preview))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
