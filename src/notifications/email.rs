use askama::Template;
use async_trait::async_trait;
use sendgrid::v3::{Content, Email, Message, Personalization, Sender};
use tracing::info;

use super::{capitalize, BookingEvent, EventKind, Notifier};
use crate::config::{BusinessContact, EmailSettings};
use crate::entities::{rupees, BookingRequest, FareBreakdown};
use crate::error::{notification_error, Error};
use crate::notifications::whatsapp;

/// Admin alert and customer confirmation for submitted bookings, sent through
/// SendGrid. Estimates are not emailed.
pub struct EmailNotifier {
    api_key: String,
    from: String,
    admin: String,
    contact: BusinessContact,
}

impl EmailNotifier {
    pub fn new(settings: &EmailSettings, contact: &BusinessContact) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            from: settings.from.clone(),
            admin: settings.admin.clone(),
            contact: contact.clone(),
        }
    }

    #[tracing::instrument(skip(self, to, html))]
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), Error> {
        let from = Email::new(self.from.as_str()).set_name(self.contact.name.as_str());

        let message = Message::new(from)
            .set_subject(subject)
            .add_content(
                Content::new()
                    .set_content_type("text/html")
                    .set_value(html),
            )
            .add_personalization(Personalization::new(Email::new(to)));

        let sender = Sender::new(self.api_key.clone(), None);
        let response = sender.send(&message).await.map_err(notification_error)?;

        if !response.status().is_success() {
            return Err(notification_error(format!(
                "sendgrid responded with {}",
                response.status()
            )));
        }

        info!("email sent");
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, event: &BookingEvent) -> Result<(), Error> {
        if event.kind != EventKind::Booking {
            return Ok(());
        }

        let request = &event.request;

        let admin = match render_admin_html(request, &event.fare, &self.contact) {
            Ok(html) => {
                self.send(
                    &self.admin,
                    &format!("New Taxi Booking Request - {}", request.name()),
                    &html,
                )
                .await
            }
            Err(err) => Err(err),
        };

        let customer = match request.email() {
            Some(email) => match render_customer_html(request, &event.fare, &self.contact) {
                Ok(html) => {
                    self.send(
                        email,
                        &format!("Booking Confirmation - {}", self.contact.name),
                        &html,
                    )
                    .await
                }
                Err(err) => Err(err),
            },
            None => Ok(()),
        };

        admin.and(customer)
    }
}

/// Rows shared by both emails; see `templates/trip_rows.html`.
struct TripDetails<'a> {
    from: &'a str,
    to: &'a str,
    trip_type: String,
    date: &'a str,
    time: &'a str,
    vehicle: String,
    distance: f64,
    duration: Option<&'a str>,
}

impl<'a> TripDetails<'a> {
    fn new(request: &'a BookingRequest, fare: &FareBreakdown) -> Self {
        Self {
            from: request.pickup_location(),
            to: request.drop_location(),
            trip_type: capitalize(request.trip_name()),
            date: request.date(),
            time: request.time(),
            vehicle: capitalize(request.car_name()),
            distance: fare.distance_km,
            duration: request.estimated_duration.as_deref(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin_booking.html")]
struct AdminBookingEmail<'a> {
    brand: &'a str,
    trip: TripDetails<'a>,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    booking_id: &'a str,
    rate: String,
    base: String,
    bata: String,
    total: String,
    whatsapp: String,
}

#[derive(Template)]
#[template(path = "customer_booking.html")]
struct CustomerBookingEmail<'a> {
    brand: &'a str,
    trip: TripDetails<'a>,
    name: &'a str,
    total: String,
    base: String,
    bata: String,
    contact_phone: &'a str,
    contact_email: &'a str,
    tel: String,
    support: String,
}

pub fn render_admin_html(
    request: &BookingRequest,
    fare: &FareBreakdown,
    contact: &BusinessContact,
) -> Result<String, Error> {
    let whatsapp = whatsapp::deep_link(
        &whatsapp::customer_number(request.phone()),
        &format!(
            "Hi {}, Thank you for booking with {}. We have received your booking request.",
            request.name(),
            contact.name
        ),
    );

    AdminBookingEmail {
        brand: &contact.name,
        trip: TripDetails::new(request, fare),
        name: request.name(),
        phone: request.phone(),
        email: request.email().unwrap_or("Not provided"),
        booking_id: &fare.estimation_id,
        rate: rupees(u64::from(fare.rate_per_km)),
        base: rupees(fare.base_price),
        bata: rupees(fare.driver_allowance),
        total: rupees(fare.total_price),
        whatsapp,
    }
    .render()
    .map_err(notification_error)
}

pub fn render_customer_html(
    request: &BookingRequest,
    fare: &FareBreakdown,
    contact: &BusinessContact,
) -> Result<String, Error> {
    CustomerBookingEmail {
        brand: &contact.name,
        trip: TripDetails::new(request, fare),
        name: request.name(),
        total: rupees(fare.total_price),
        base: rupees(fare.base_price),
        bata: rupees(fare.driver_allowance),
        contact_phone: &contact.phone,
        contact_email: &contact.email,
        tel: contact.phone.replace(' ', ""),
        support: whatsapp::deep_link(
            &contact.whatsapp,
            "Hi, I just made a booking and need assistance.",
        ),
    }
    .render()
    .map_err(notification_error)
}
