use super::Engine;

use async_trait::async_trait;

use crate::{
    api::EstimateAPI,
    entities::{BookingRequest, Quote},
    error::Error,
    notifications::{whatsapp, BookingEvent, EventKind},
};

#[async_trait]
impl EstimateAPI for Engine {
    #[tracing::instrument(skip_all)]
    async fn create_estimate(&self, mut request: BookingRequest) -> Result<Quote, Error> {
        self.resolve_distance(&mut request).await;

        let fare = self.price(&request)?;

        tracing::info!(
            id = %fare.estimation_id,
            distance_km = fare.distance_km,
            rate_per_km = fare.rate_per_km,
            total_price = fare.total_price,
            "price estimation calculated"
        );

        let links = whatsapp::estimate_links(&request, &fare, &self.contact);
        let quote = Quote::new(fare.clone(), request.estimated_duration.clone(), links);

        self.dispatcher
            .dispatch(BookingEvent::new(EventKind::Estimate, request, fare));

        Ok(quote)
    }
}
