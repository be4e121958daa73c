use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use serde::Serialize;

use crate::config::Settings;
use crate::entities::{BookingRequest, FareDisplay, WhatsAppLinks};
use crate::error::Error;
use crate::server::{ContactInfo, DynAPI, Reply};

const DURATION_PENDING: &str = "Calculating...";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateData {
    pub estimation_id: String,
    pub estimated_distance: f64,
    pub estimated_duration: String,
    pub rate_per_km: u32,
    pub base_price: u64,
    pub driver_bata: u64,
    pub total_price: u64,
    pub breakdown: FareDisplay,
    pub whatsapp_links: WhatsAppLinks,
    pub contact_info: ContactInfo,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(settings): Extension<Arc<Settings>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Reply<EstimateData>>, Error> {
    let Json(request) = payload.map_err(|err| Error::from(err).exposed(settings.development))?;

    let quote = api
        .create_estimate(request)
        .await
        .map_err(|err| err.exposed(settings.development))?;

    let fare = quote.fare;

    let data = EstimateData {
        breakdown: fare.display(),
        estimation_id: fare.estimation_id,
        estimated_distance: fare.distance_km,
        estimated_duration: quote
            .estimated_duration
            .unwrap_or_else(|| DURATION_PENDING.to_string()),
        rate_per_km: fare.rate_per_km,
        base_price: fare.base_price,
        driver_bata: fare.driver_allowance,
        total_price: fare.total_price,
        whatsapp_links: quote.whatsapp_links,
        contact_info: ContactInfo::from(&settings.contact),
    };

    Ok(Reply::new("Price estimation calculated successfully!", data).into())
}
