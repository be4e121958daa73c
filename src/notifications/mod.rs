//! Fire-and-forget delivery of booking notifications.
//!
//! Handlers hand a [`BookingEvent`] to the [`Dispatcher`] and return right
//! away. A single worker task drains a bounded queue and fans each event out to
//! every registered [`Notifier`] under a per-sink deadline. Failures are logged
//! and dropped, never retried.

pub mod email;
pub mod telegram;
pub mod whatsapp;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_channel::{Receiver, Sender, TrySendError};
use async_trait::async_trait;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::Settings;
use crate::entities::{BookingRequest, FareBreakdown};
use crate::error::Error;

pub use email::EmailNotifier;
pub use telegram::TelegramNotifier;

/// Events waiting for delivery. Further events are dropped until the worker
/// catches up.
pub const QUEUE_CAPACITY: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Estimate,
    Booking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingEvent {
    pub kind: EventKind,
    pub request: BookingRequest,
    pub fare: FareBreakdown,
}

impl BookingEvent {
    pub fn new(kind: EventKind, request: BookingRequest, fare: FareBreakdown) -> Self {
        Self {
            kind,
            request,
            fare,
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, event: &BookingEvent) -> Result<(), Error>;
}

#[derive(Clone)]
pub struct Dispatcher {
    sender: Sender<BookingEvent>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Dispatcher {
    /// Spawns the delivery worker. Must be called inside a tokio runtime.
    ///
    /// Each sink gets `delivery_timeout` per event; a sink that overruns it is
    /// abandoned for that event so later events are not held up.
    pub fn start(notifiers: Vec<Arc<dyn Notifier>>, delivery_timeout: Duration) -> Self {
        let (sender, receiver) = async_channel::bounded(QUEUE_CAPACITY);

        let worker = tokio::spawn(run_worker(receiver, notifiers, delivery_timeout));

        Self {
            sender,
            worker: Arc::new(Mutex::new(Some(worker))),
        }
    }

    pub fn dispatch(&self, event: BookingEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => warn!(
                id = %event.fare.estimation_id,
                "notification queue full, dropping event"
            ),
            Err(TrySendError::Closed(event)) => warn!(
                id = %event.fare.estimation_id,
                "notification queue closed, dropping event"
            ),
        }
    }

    /// Stops accepting events and lets the worker drain what is queued,
    /// waiting at most `grace`.
    pub async fn shutdown(&self, grace: Duration) {
        self.sender.close();

        let worker = match self.worker.lock() {
            Ok(mut worker) => worker.take(),
            Err(_) => None,
        };

        let Some(mut worker) = worker else {
            return;
        };

        if tokio::time::timeout(grace, &mut worker).await.is_err() {
            warn!(
                dropped = self.sender.len(),
                "notification worker did not drain in time"
            );
            worker.abort();
        }
    }
}

async fn run_worker(
    receiver: Receiver<BookingEvent>,
    notifiers: Vec<Arc<dyn Notifier>>,
    delivery_timeout: Duration,
) {
    while let Ok(event) = receiver.recv().await {
        join_all(
            notifiers
                .iter()
                .map(|notifier| deliver(notifier.as_ref(), &event, delivery_timeout)),
        )
        .await;
    }

    info!("notification worker stopped");
}

async fn deliver(notifier: &dyn Notifier, event: &BookingEvent, timeout: Duration) {
    match tokio::time::timeout(timeout, notifier.notify(event)).await {
        Ok(Ok(())) => info!(
            notifier = notifier.name(),
            id = %event.fare.estimation_id,
            "notification sent"
        ),
        Ok(Err(err)) => error!(
            notifier = notifier.name(),
            id = %event.fare.estimation_id,
            "notification failed: {}",
            err
        ),
        Err(_) => error!(
            notifier = notifier.name(),
            id = %event.fare.estimation_id,
            "notification timed out after {:?}",
            timeout
        ),
    }
}

/// Every sink that has credentials configured.
pub fn from_settings(settings: &Settings) -> Result<Vec<Arc<dyn Notifier>>, Error> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();

    match &settings.email {
        Some(email) => notifiers.push(Arc::new(EmailNotifier::new(email, &settings.contact))),
        None => info!("SENDGRID_API_KEY not set, email notifications disabled"),
    }

    match &settings.telegram {
        Some(telegram) => notifiers.push(Arc::new(TelegramNotifier::new(
            telegram,
            settings.http_timeout,
        )?)),
        None => info!("TELEGRAM_BOT_TOKEN not set, telegram notifications disabled"),
    }

    Ok(notifiers)
}

/// `"sedan"` -> `"Sedan"`, `"one-way"` -> `"One-way"`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmailSettings, TelegramSettings};

    #[test]
    fn capitalizes_first_letter() {
        assert_eq!(capitalize("sedan"), "Sedan");
        assert_eq!(capitalize("one-way"), "One-way");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn registers_only_configured_sinks() {
        let mut settings = Settings::default();
        assert!(from_settings(&settings).unwrap().is_empty());

        settings.email = Some(EmailSettings {
            api_key: "SG.key".into(),
            from: "bookings@happyride.in".into(),
            admin: "ops@happyride.in".into(),
        });
        settings.telegram = Some(TelegramSettings {
            bot_token: "123:abc".into(),
            chat_id: "-1001".into(),
            api_base: "https://api.telegram.org".into(),
        });

        let names: Vec<&str> = from_settings(&settings)
            .unwrap()
            .iter()
            .map(|notifier| notifier.name())
            .collect();

        assert_eq!(names, ["email", "telegram"]);
    }
}
