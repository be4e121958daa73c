//! Fare estimation and booking validation.
//!
//! [`validate_and_price`] is the whole rule set: it is synchronous, reads no
//! global state, and takes the clock reading and random source from the caller
//! so a fixed `now` and a seeded RNG make it fully deterministic.

mod rates;
mod validation;

pub use rates::{
    minimum_distance_km, rate_per_km, DEFAULT_RATE_PER_KM, DRIVER_ALLOWANCE, MAXIMUM_DISTANCE_KM,
};
pub use validation::{
    check_fields, is_valid_email, is_valid_phone, normalize_phone, ValidationError,
    PHONE_DIGITS,
};

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::entities::{BookingRequest, FareBreakdown};

pub const DEFAULT_FALLBACK_DISTANCE_KM: f64 = 150.0;

/// Distance substituted when the caller did not supply a usable one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FallbackDistance {
    Fixed(f64),
    /// Whole kilometers drawn uniformly from `[low, high)`.
    Uniform { low: f64, high: f64 },
}

impl FallbackDistance {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Fixed(km) => km,
            Self::Uniform { low, high } if low < high => {
                Uniform::new(low, high).sample(rng).floor()
            }
            Self::Uniform { low, .. } => low,
        }
    }
}

impl Default for FallbackDistance {
    fn default() -> Self {
        Self::Fixed(DEFAULT_FALLBACK_DISTANCE_KM)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PricingPolicy {
    pub fallback_distance: FallbackDistance,
}

impl PricingPolicy {
    pub fn new(fallback_distance: FallbackDistance) -> Self {
        Self { fallback_distance }
    }
}

/// Validates a booking submission and prices it.
///
/// Field, format and minimum-distance failures are all collected and returned
/// together; a price is produced only when there are none.
pub fn validate_and_price<R: Rng + ?Sized>(
    request: &BookingRequest,
    policy: &PricingPolicy,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<FareBreakdown, Vec<ValidationError>> {
    let mut errors = check_fields(request);

    let distance_km = match request.measured_distance() {
        Some(km) => km,
        None => policy.fallback_distance.resolve(rng),
    };

    if let Some(trip_type) = request.trip_type {
        let minimum = minimum_distance_km(trip_type);
        if distance_km < f64::from(minimum) {
            errors.push(ValidationError::new(
                "distance",
                format!(
                    "Minimum distance for {trip_type} trips is {minimum} km. Current distance: {distance_km} km"
                ),
            ));
        }
    }

    if distance_km > f64::from(MAXIMUM_DISTANCE_KM) {
        errors.push(ValidationError::new(
            "distance",
            format!(
                "Maximum distance is {MAXIMUM_DISTANCE_KM} km. Current distance: {distance_km} km"
            ),
        ));
    }

    // a missing trip type is always among the collected errors
    match request.trip_type {
        Some(trip_type) if errors.is_empty() => {
            let rate = rate_per_km(request.car_type.as_ref(), trip_type);
            let base_price = (distance_km * f64::from(rate)).round() as u64;

            Ok(FareBreakdown {
                estimation_id: estimation_id(now, rng),
                distance_km,
                rate_per_km: rate,
                base_price,
                driver_allowance: DRIVER_ALLOWANCE,
                total_price: base_price + DRIVER_ALLOWANCE,
            })
        }
        _ => Err(errors),
    }
}

/// `HRD<unix millis>-<4 digits>`. Only advisory: nothing is looked up by it.
pub fn estimation_id<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> String {
    format!(
        "HRD{}-{:04}",
        now.timestamp_millis(),
        rng.gen_range(0..10_000u32)
    )
}
