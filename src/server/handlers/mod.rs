pub mod bookings;
pub mod estimates;
pub mod fallback;
pub mod health;
