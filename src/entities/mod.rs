mod booking;
mod fare;
mod location;
mod quote;

pub use booking::{BookingRequest, CarType, TripType};
pub use fare::{rupees, FareBreakdown, FareDisplay};
pub use location::Coordinates;
pub use quote::{Quote, WhatsAppLinks};
