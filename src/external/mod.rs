pub mod google_maps;

use std::time::Duration;

use reqwest::Client;

use crate::error::Error;

/// Client for outbound calls made while a caller or the notification worker
/// is waiting. Connecting and the whole request share one deadline.
pub fn http_client(timeout: Duration) -> Result<Client, Error> {
    let client = Client::builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?;

    Ok(client)
}
