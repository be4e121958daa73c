use crate::entities::{CarType, TripType};

/// Flat "driver bata" added to every fare.
pub const DRIVER_ALLOWANCE: u64 = 400;

/// Per-km rate for vehicle classes the fleet does not list.
pub const DEFAULT_RATE_PER_KM: u32 = 14;

/// Currency units per km for a vehicle class on a given trip type.
pub fn rate_per_km(car_type: Option<&CarType>, trip_type: TripType) -> u32 {
    use TripType::{OneWay, RoundTrip};

    match (car_type, trip_type) {
        (Some(CarType::Sedan), OneWay) => 14,
        (Some(CarType::Sedan), RoundTrip) => 13,
        (Some(CarType::Etios), OneWay) => 15,
        (Some(CarType::Etios), RoundTrip) => 14,
        (Some(CarType::Suv), OneWay) => 19,
        (Some(CarType::Suv), RoundTrip) => 18,
        (Some(CarType::Innova), OneWay) => 20,
        (Some(CarType::Innova), RoundTrip) => 18,
        (Some(CarType::Other(_)) | None, _) => DEFAULT_RATE_PER_KM,
    }
}

/// Longest trip accepted, in km. Keeps every fare well inside `u64`.
pub const MAXIMUM_DISTANCE_KM: u32 = 5000;

/// Shortest trip accepted, in km. The bound itself is accepted.
pub fn minimum_distance_km(trip_type: TripType) -> u32 {
    match trip_type {
        TripType::OneWay => 130,
        TripType::RoundTrip => 250,
    }
}
