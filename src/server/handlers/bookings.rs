use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Json};
use serde::Serialize;

use crate::config::Settings;
use crate::entities::{BookingRequest, FareDisplay, WhatsAppLinks};
use crate::error::Error;
use crate::server::{DynAPI, Reply};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub booking_id: String,
    pub estimated_distance: f64,
    pub estimated_duration: Option<String>,
    pub rate_per_km: u32,
    pub base_price: u64,
    pub driver_bata: u64,
    pub total_price: u64,
    pub breakdown: FareDisplay,
    pub whatsapp_links: WhatsAppLinks,
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Extension(settings): Extension<Arc<Settings>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<Reply<BookingData>>, Error> {
    let Json(request) = payload.map_err(|err| Error::from(err).exposed(settings.development))?;

    let quote = api
        .create_booking(request)
        .await
        .map_err(|err| err.exposed(settings.development))?;

    let fare = quote.fare;

    let data = BookingData {
        breakdown: fare.display(),
        booking_id: fare.estimation_id,
        estimated_distance: fare.distance_km,
        estimated_duration: quote.estimated_duration,
        rate_per_km: fare.rate_per_km,
        base_price: fare.base_price,
        driver_bata: fare.driver_allowance,
        total_price: fare.total_price,
        whatsapp_links: quote.whatsapp_links,
    };

    Ok(Reply::new(
        "Booking request submitted successfully! We will contact you shortly.",
        data,
    )
    .into())
}
