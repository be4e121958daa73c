use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http_client;
use crate::{
    config::GoogleMapsSettings,
    entities::Coordinates,
    error::{upstream_error, Error},
};

/// Road distance between two points as reported by the Distance Matrix API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrivingDistance {
    /// Whole kilometers.
    pub distance_km: f64,
    pub duration: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Clone, Debug, Deserialize)]
struct Row {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Clone, Debug, Deserialize)]
struct Element {
    status: String,
    distance: Option<Measure>,
    duration: Option<Measure>,
}

#[derive(Clone, Debug, Deserialize)]
struct Measure {
    text: String,
    value: f64,
}

pub struct GoogleMaps {
    client: Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(settings: &GoogleMapsSettings, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(timeout)?,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn driving_distance(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<DrivingDistance, Error> {
        let url = format!("{}/maps/api/distancematrix/json", self.api_base);
        let origins: String = origin.into();
        let destinations: String = destination.into();

        let res = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(&[("origins", origins)])
            .query(&[("destinations", destinations)])
            .query(&[("mode", "driving"), ("units", "metric")])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code != 200 {
            return Err(upstream_error(format!("distance matrix returned {status_code}")));
        }

        let data: Response = res.json().await?;

        if data.status != "OK" {
            return Err(upstream_error(format!("distance matrix status {}", data.status)));
        }

        let element = data
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| upstream_error("distance matrix returned no elements"))?;

        if element.status != "OK" {
            return Err(upstream_error(format!(
                "no route between locations: {}",
                element.status
            )));
        }

        let meters = element
            .distance
            .map(|distance| distance.value)
            .ok_or_else(|| upstream_error("distance matrix element without distance"))?;

        Ok(DrivingDistance {
            distance_km: (meters / 1000.0).round(),
            duration: element.duration.map(|duration| duration.text),
        })
    }
}
