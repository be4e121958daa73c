use super::Engine;

use async_trait::async_trait;

use crate::{
    api::BookingAPI,
    entities::{BookingRequest, Quote},
    error::Error,
    notifications::{whatsapp, BookingEvent, EventKind},
};

#[async_trait]
impl BookingAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn create_booking(&self, mut request: BookingRequest) -> Result<Quote, Error> {
        self.resolve_distance(&mut request).await;

        let fare = self.price(&request)?;

        tracing::info!(
            id = %fare.estimation_id,
            distance_km = fare.distance_km,
            total_price = fare.total_price,
            "booking accepted"
        );

        let links = whatsapp::booking_links(&request, &fare, &self.contact);
        let quote = Quote::new(fare.clone(), request.estimated_duration.clone(), links);

        self.dispatcher
            .dispatch(BookingEvent::new(EventKind::Booking, request, fare));

        Ok(quote)
    }
}
