use std::time::Duration;

use askama::Template;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::{BookingEvent, EventKind, Notifier};
use crate::config::TelegramSettings;
use crate::entities::rupees;
use crate::error::{notification_error, Error};
use crate::external::http_client;

/// Posts a summary of every estimate and booking to the operators' chat.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings, timeout: Duration) -> Result<Self, Error> {
        Ok(Self {
            client: http_client(timeout)?,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            bot_token: settings.bot_token.clone(),
            chat_id: settings.chat_id.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, event: &BookingEvent) -> Result<(), Error> {
        let text = render_message(event)?;

        let response = self
            .client
            .post(self.send_message_url())
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            }))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(notification_error(format!(
                "telegram sendMessage failed with status: {}",
                response.status()
            )))
        }
    }
}

/// Telegram's HTML parse mode; see `templates/telegram_message.html`.
#[derive(Template)]
#[template(path = "telegram_message.html")]
struct TelegramMessage<'a> {
    booking: bool,
    id: &'a str,
    name: &'a str,
    phone: &'a str,
    email: Option<&'a str>,
    from: &'a str,
    to: &'a str,
    date: &'a str,
    time: &'a str,
    vehicle: String,
    trip_type: &'a str,
    distance: f64,
    rate: String,
    total: String,
    bata: String,
}

pub fn render_message(event: &BookingEvent) -> Result<String, Error> {
    let request = &event.request;
    let fare = &event.fare;

    TelegramMessage {
        booking: event.kind == EventKind::Booking,
        id: &fare.estimation_id,
        name: request.name(),
        phone: request.phone(),
        email: request.email(),
        from: request.pickup_location(),
        to: request.drop_location(),
        date: request.date(),
        time: request.time(),
        vehicle: request.car_name().to_uppercase(),
        trip_type: request.trip_name(),
        distance: fare.distance_km,
        rate: rupees(u64::from(fare.rate_per_km)),
        total: rupees(fare.total_price),
        bata: rupees(fare.driver_allowance),
    }
    .render()
    .map_err(notification_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BookingRequest, CarType, FareBreakdown, TripType};

    fn event(kind: EventKind) -> BookingEvent {
        BookingEvent::new(
            kind,
            BookingRequest {
                pickup_location: Some("Trichy".into()),
                drop_location: Some("Chennai".into()),
                trip_type: Some(TripType::OneWay),
                date: Some("2025-03-01".into()),
                time: Some("22:15".into()),
                car_type: Some(CarType::Sedan),
                name: Some("<script>".into()),
                phone: Some("9876543210".into()),
                ..Default::default()
            },
            FareBreakdown {
                estimation_id: "HRD1740000000000-1234".into(),
                distance_km: 330.0,
                rate_per_km: 14,
                base_price: 4620,
                driver_allowance: 400,
                total_price: 5020,
            },
        )
    }

    #[test]
    fn message_is_html_safe() {
        let text = render_message(&event(EventKind::Booking)).unwrap();

        assert!(text.starts_with("🚗 <b>New Booking Request</b>"));
        assert!(text.contains("👤 &lt;script&gt;"));
        assert!(text.contains("📍 Trichy → Chennai"));
        assert!(text.contains("🚗 SEDAN (one-way)"));
        assert!(text.contains("<b>₹5020</b>"));
        assert!(!text.contains("✉️"));
    }

    #[test]
    fn email_line_only_when_given() {
        let mut booking = event(EventKind::Booking);
        booking.request.email = Some("a&b@example.com".into());

        let text = render_message(&booking).unwrap();

        assert!(text.contains("✉️ a&amp;b@example.com\n📍"));
    }

    #[test]
    fn estimate_has_its_own_title() {
        let text = render_message(&event(EventKind::Estimate)).unwrap();

        assert!(text.starts_with("🚖 <b>New Price Estimation</b>"));
    }

    #[test]
    fn url_includes_token() {
        let notifier = TelegramNotifier::new(
            &TelegramSettings {
                bot_token: "123:abc".into(),
                chat_id: "-1001".into(),
                api_base: "https://api.telegram.org/".into(),
            },
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            notifier.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }
}
