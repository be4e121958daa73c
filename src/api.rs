use async_trait::async_trait;

use crate::entities::{BookingRequest, Quote};
use crate::error::Error;

#[async_trait]
pub trait EstimateAPI {
    /// Validates and prices a submission without committing to a booking.
    async fn create_estimate(&self, request: BookingRequest) -> Result<Quote, Error>;
}

#[async_trait]
pub trait BookingAPI {
    /// Validates and prices a submission and notifies the operators and the
    /// customer. Nothing is stored.
    async fn create_booking(&self, request: BookingRequest) -> Result<Quote, Error>;
}

pub trait API: EstimateAPI + BookingAPI {}
