use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use crate::error::{config_error, Error};
use crate::pricing::{FallbackDistance, DEFAULT_FALLBACK_DISTANCE_KM};

pub const DEFAULT_PORT: u16 = 3001;

/// Deadline for a single outbound HTTP call (Distance Matrix, Telegram).
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for one sink to deliver one event, SendGrid included.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_CORS_ORIGINS: [&str; 6] = [
    "http://localhost:5173",
    "https://localhost:5173",
    "http://127.0.0.1:5173",
    "https://127.0.0.1:5173",
    "http://localhost:3000",
    "https://localhost:3000",
];

/// How the business presents itself in messages and on the fare card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusinessContact {
    pub name: String,
    pub whatsapp: String,
    pub phone: String,
    pub email: String,
}

impl Default for BusinessContact {
    fn default() -> Self {
        Self {
            name: "Happy Ride Drop Taxi".into(),
            whatsapp: "919087520500".into(),
            phone: "+91 9087520500".into(),
            email: "happyridedroptaxi@gmail.com".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailSettings {
    pub api_key: String,
    pub from: String,
    pub admin: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoogleMapsSettings {
    pub api_key: String,
    pub api_base: String,
}

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub host: IpAddr,
    pub port: u16,
    /// Exposes internal error details to API callers.
    pub development: bool,
    /// An empty list allows any origin (without credentials).
    pub cors_origins: Vec<String>,
    pub fallback_distance: FallbackDistance,
    pub http_timeout: Duration,
    pub notification_timeout: Duration,
    pub contact: BusinessContact,
    pub email: Option<EmailSettings>,
    pub telegram: Option<TelegramSettings>,
    pub google_maps: Option<GoogleMapsSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            development: false,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            fallback_distance: FallbackDistance::default(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            contact: BusinessContact::default(),
            email: None,
            telegram: None,
            google_maps: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    /// Builds settings from any key/value source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let host = match var("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .map_err(|_| config_error("Invalid HOST"))?,
            None => defaults.host,
        };

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT"))?,
            None => defaults.port,
        };

        let development = var("APP_ENV")
            .or_else(|| var("NODE_ENV"))
            .map(|env| env.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let cors_origins = match var("CORS_ORIGINS") {
            Some(origins) if origins == "*" => Vec::new(),
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.cors_origins,
        };

        let parse_km = |key: &str, default: f64| -> Result<f64, Error> {
            match var(key) {
                Some(value) => value
                    .parse::<f64>()
                    .ok()
                    .filter(|km| km.is_finite() && *km > 0.0)
                    .ok_or_else(|| config_error(format!("Invalid {key}"))),
                None => Ok(default),
            }
        };

        let fallback_distance = match var("FALLBACK_DISTANCE_MODE").as_deref() {
            None | Some("fixed") => FallbackDistance::Fixed(parse_km(
                "FALLBACK_DISTANCE_KM",
                DEFAULT_FALLBACK_DISTANCE_KM,
            )?),
            Some("random") => {
                let low = parse_km("FALLBACK_DISTANCE_MIN_KM", 100.0)?;
                let high = parse_km("FALLBACK_DISTANCE_MAX_KM", 400.0)?;
                if low >= high {
                    return Err(config_error(
                        "FALLBACK_DISTANCE_MIN_KM must be below FALLBACK_DISTANCE_MAX_KM",
                    ));
                }
                FallbackDistance::Uniform { low, high }
            }
            Some(_) => return Err(config_error("Invalid FALLBACK_DISTANCE_MODE")),
        };

        let parse_secs = |key: &str, default: Duration| -> Result<Duration, Error> {
            match var(key) {
                Some(value) => value
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| config_error(format!("Invalid {key}"))),
                None => Ok(default),
            }
        };

        let http_timeout = parse_secs("HTTP_TIMEOUT_SECS", defaults.http_timeout)?;
        let notification_timeout =
            parse_secs("NOTIFICATION_TIMEOUT_SECS", defaults.notification_timeout)?;

        let contact = BusinessContact {
            name: var("BUSINESS_NAME").unwrap_or(defaults.contact.name),
            whatsapp: var("BUSINESS_WHATSAPP").unwrap_or(defaults.contact.whatsapp),
            phone: var("CONTACT_PHONE").unwrap_or(defaults.contact.phone),
            email: var("CONTACT_EMAIL").unwrap_or(defaults.contact.email),
        };

        let email = var("SENDGRID_API_KEY").map(|api_key| EmailSettings {
            api_key,
            from: var("EMAIL_FROM").unwrap_or_else(|| contact.email.clone()),
            admin: var("ADMIN_EMAIL").unwrap_or_else(|| contact.email.clone()),
        });

        let telegram = match (var("TELEGRAM_BOT_TOKEN"), var("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramSettings {
                bot_token,
                chat_id,
                api_base: var("TELEGRAM_API_BASE")
                    .unwrap_or_else(|| "https://api.telegram.org".into()),
            }),
            (Some(_), None) => return Err(config_error("TELEGRAM_CHAT_ID is required")),
            _ => None,
        };

        let google_maps = var("GOOGLE_MAPS_API_KEY").map(|api_key| GoogleMapsSettings {
            api_key,
            api_base: var("GOOGLE_MAPS_API_BASE")
                .unwrap_or_else(|| "https://maps.googleapis.com".into()),
        });

        Ok(Self {
            host,
            port,
            development,
            cors_origins,
            fallback_distance,
            http_timeout,
            notification_timeout,
            contact,
            email,
            telegram,
            google_maps,
        })
    }
}
