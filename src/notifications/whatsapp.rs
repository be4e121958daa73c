use crate::config::BusinessContact;
use crate::entities::{rupees, BookingRequest, FareBreakdown, WhatsAppLinks};
use crate::pricing::normalize_phone;

const COUNTRY_CODE: &str = "91";

/// `https://wa.me/<digits>?text=<message>`.
pub fn deep_link(number: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(number),
        urlencoding::encode(message)
    )
}

/// Customers type local ten-digit numbers; wa.me wants the country code.
pub fn customer_number(phone: &str) -> String {
    format!("{COUNTRY_CODE}{}", normalize_phone(phone))
}

pub fn estimate_links(
    request: &BookingRequest,
    fare: &FareBreakdown,
    contact: &BusinessContact,
) -> WhatsAppLinks {
    let customer = format!(
        "🚖 {name} - Price Estimation\n\n\
         Estimation ID: {id}\n\
         From: {from}\n\
         To: {to}\n\
         Trip: {trip}\n\
         Date: {date} at {time}\n\
         Car: {car}\n\
         Distance: {distance}km\n\
         Estimated Price: {total}\n\n\
         To confirm booking, please reply to this message or call {phone}",
        name = contact.name,
        id = fare.estimation_id,
        from = request.pickup_location(),
        to = request.drop_location(),
        trip = request.trip_name(),
        date = request.date(),
        time = request.time(),
        car = request.car_name().to_uppercase(),
        distance = fare.distance_km,
        total = rupees(fare.total_price),
        phone = contact.phone,
    );

    let admin = format!(
        "🚖 New Price Estimation Request\n\n\
         ID: {id}\n\
         Customer: {customer}\n\
         Phone: {phone}\n\
         Email: {email}\n\
         From: {from}\n\
         To: {to}\n\
         Trip: {trip}\n\
         Date: {date} at {time}\n\
         Car: {car}\n\
         Distance: {distance}km\n\
         Estimated Price: {total}",
        id = fare.estimation_id,
        customer = request.name(),
        phone = request.phone(),
        email = request.email().unwrap_or("Not provided"),
        from = request.pickup_location(),
        to = request.drop_location(),
        trip = request.trip_name(),
        date = request.date(),
        time = request.time(),
        car = request.car_name().to_uppercase(),
        distance = fare.distance_km,
        total = rupees(fare.total_price),
    );

    WhatsAppLinks {
        admin: deep_link(&contact.whatsapp, &admin),
        customer: deep_link(&customer_number(request.phone()), &customer),
    }
}

pub fn booking_links(
    request: &BookingRequest,
    fare: &FareBreakdown,
    contact: &BusinessContact,
) -> WhatsAppLinks {
    let admin = format!(
        "🚗 NEW BOOKING REQUEST\n\n\
         🆔 Booking: {id}\n\
         👤 Customer: {customer}\n\
         📱 Phone: {phone}\n\
         📍 From: {from}\n\
         📍 To: {to}\n\
         🚗 Vehicle: {car}\n\
         📅 Date: {date}\n\
         ⏰ Time: {time}\n\
         🛣️ Trip: {trip}\n\
         📏 Distance: ~{distance}km\n\
         💰 Fare: {total}\n\n\
         Please call customer to confirm booking.",
        id = fare.estimation_id,
        customer = request.name(),
        phone = request.phone(),
        from = request.pickup_location(),
        to = request.drop_location(),
        car = request.car_name().to_uppercase(),
        date = request.date(),
        time = request.time(),
        trip = request.trip_name(),
        distance = fare.distance_km,
        total = rupees(fare.total_price),
    );

    let customer = format!(
        "Hi {customer}! 👋\n\n\
         Thank you for booking with {name}! 🚗\n\n\
         📋 Your booking details:\n\
         📍 {from} → {to}\n\
         📅 {date} at {time}\n\
         🚗 Vehicle: {car}\n\
         💰 Estimated fare: {total}\n\n\
         We'll call you within 30 minutes to confirm.\n\n\
         For any queries: {phone}\n\
         {name} 🌟",
        customer = request.name(),
        name = contact.name,
        from = request.pickup_location(),
        to = request.drop_location(),
        date = request.date(),
        time = request.time(),
        car = request.car_name().to_uppercase(),
        total = rupees(fare.total_price),
        phone = contact.phone,
    );

    WhatsAppLinks {
        admin: deep_link(&contact.whatsapp, &admin),
        customer: deep_link(&customer_number(request.phone()), &customer),
    }
}
