use super::Engine;

use chrono::Utc;

use crate::{
    entities::{BookingRequest, FareBreakdown},
    error::{validation_error, Error},
    pricing,
};

impl Engine {
    /// Fills in `distance` from the pickup/drop coordinates when the caller did
    /// not measure it. Lookup failures fall back to the great-circle distance;
    /// with no coordinates at all the pricing fallback applies.
    #[tracing::instrument(skip_all)]
    pub(super) async fn resolve_distance(&self, request: &mut BookingRequest) {
        if request.measured_distance().is_some() {
            return;
        }

        let (origin, destination) = match (request.pickup_coordinates, request.drop_coordinates) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return,
        };

        if let Some(maps) = &self.maps {
            match maps.driving_distance(origin, destination).await {
                Ok(route) => {
                    tracing::debug!(distance_km = route.distance_km, "driving distance resolved");
                    request.distance = Some(route.distance_km);
                    if request.estimated_duration.is_none() {
                        request.estimated_duration = route.duration;
                    }
                    return;
                }
                Err(err) => tracing::warn!("distance lookup failed, using haversine: {}", err),
            }
        }

        request.distance = Some(origin.haversine_km(&destination).round());
    }

    pub(super) fn price(&self, request: &BookingRequest) -> Result<FareBreakdown, Error> {
        let mut rng = rand::thread_rng();

        pricing::validate_and_price(request, &self.policy, Utc::now(), &mut rng).map_err(
            |errors| {
                tracing::info!(errors = errors.len(), "booking request rejected");
                validation_error(errors)
            },
        )
    }
}
