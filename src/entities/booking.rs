use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneWay => "one-way",
            Self::RoundTrip => "round-trip",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle class. Values the fleet does not know are kept verbatim so they can
/// still be priced (at the fallback rate) and echoed back in notifications.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CarType {
    Sedan,
    Etios,
    Suv,
    Innova,
    Other(String),
}

impl CarType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sedan => "sedan",
            Self::Etios => "etios",
            Self::Suv => "suv",
            Self::Innova => "innova",
            Self::Other(name) => name.as_str(),
        }
    }
}

impl From<String> for CarType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "sedan" => Self::Sedan,
            "etios" => Self::Etios,
            "suv" => Self::Suv,
            "innova" => Self::Innova,
            _ => Self::Other(name),
        }
    }
}

impl From<CarType> for String {
    fn from(car_type: CarType) -> String {
        car_type.as_str().to_string()
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking or estimate submission exactly as the booking form posts it.
///
/// Every field is optional on the wire; presence and format rules are enforced
/// by [`crate::pricing::validate_and_price`] so that all problems can be
/// reported together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub trip_type: Option<TripType>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub car_type: Option<CarType>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub distance: Option<f64>,
    pub estimated_duration: Option<String>,
    pub pickup_coordinates: Option<Coordinates>,
    pub drop_coordinates: Option<Coordinates>,
}

impl BookingRequest {
    pub fn pickup_location(&self) -> &str {
        text(&self.pickup_location)
    }

    pub fn drop_location(&self) -> &str {
        text(&self.drop_location)
    }

    pub fn date(&self) -> &str {
        text(&self.date)
    }

    pub fn time(&self) -> &str {
        text(&self.time)
    }

    pub fn name(&self) -> &str {
        text(&self.name)
    }

    pub fn phone(&self) -> &str {
        text(&self.phone)
    }

    /// The customer's email, if one was actually entered.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    pub fn car_name(&self) -> &str {
        self.car_type
            .as_ref()
            .map(CarType::as_str)
            .unwrap_or_default()
    }

    pub fn trip_name(&self) -> &str {
        self.trip_type
            .as_ref()
            .map(TripType::as_str)
            .unwrap_or_default()
    }

    /// Caller-supplied distance, only when it is usable for pricing.
    pub fn measured_distance(&self) -> Option<f64> {
        self.distance.filter(|km| km.is_finite() && *km > 0.0)
    }
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or_default()
}
