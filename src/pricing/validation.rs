use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entities::BookingRequest;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const PHONE_DIGITS: usize = 10;

/// One failed rule, addressed to the form field that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn required(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} is required"))
    }
}

/// Strips everything but ASCII digits: `"98765-43210 "` becomes `"9876543210"`.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_phone(phone: &str) -> bool {
    normalize_phone(phone).len() == PHONE_DIGITS
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Presence and format checks. Every failure is reported, not just the first.
pub fn check_fields(request: &BookingRequest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let required = [
        ("pickupLocation", "Pickup location", request.pickup_location()),
        ("dropLocation", "Drop location", request.drop_location()),
        ("date", "Date", request.date()),
        ("time", "Time", request.time()),
        ("name", "Name", request.name()),
        ("phone", "Phone number", request.phone()),
    ];

    for (field, label, value) in required {
        if value.is_empty() {
            errors.push(ValidationError::required(field, label));
        }
    }

    if request.trip_type.is_none() {
        errors.push(ValidationError::required("tripType", "Trip type"));
    }

    let phone = request.phone();
    if !phone.is_empty() && !is_valid_phone(phone) {
        errors.push(ValidationError::new(
            "phone",
            "Please enter a valid 10-digit phone number",
        ));
    }

    if let Some(email) = request.email.as_deref() {
        if !email.trim().is_empty() && !is_valid_email(email) {
            errors.push(ValidationError::new(
                "email",
                "Please enter a valid email address",
            ));
        }
    }

    errors
}
