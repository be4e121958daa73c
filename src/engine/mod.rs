mod booking_api;
mod estimate_api;
mod helpers;

use crate::{
    api::API,
    config::{BusinessContact, Settings},
    error::Error,
    external::google_maps::GoogleMaps,
    notifications::Dispatcher,
    pricing::PricingPolicy,
};

pub struct Engine {
    policy: PricingPolicy,
    contact: BusinessContact,
    maps: Option<GoogleMaps>,
    dispatcher: Dispatcher,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(settings: &Settings, dispatcher: Dispatcher) -> Result<Self, Error> {
        let maps = match &settings.google_maps {
            Some(maps) => Some(GoogleMaps::new(maps, settings.http_timeout)?),
            None => {
                tracing::info!("GOOGLE_MAPS_API_KEY not set, distances from coordinates use haversine");
                None
            }
        };

        Ok(Self {
            policy: PricingPolicy::new(settings.fallback_distance),
            contact: settings.contact.clone(),
            maps,
            dispatcher,
        })
    }
}

impl API for Engine {}
