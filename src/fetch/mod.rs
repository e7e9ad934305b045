//! Outbound HTTP plumbing shared by the timeline and ntfy clients.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AlertError, Result};

/// Sends `req` and checks the status, returning the response body on 2xx.
///
/// `service` names the remote side in [`AlertError::Api`].
pub async fn send_checked<C: HttpClient>(
    client: &C,
    service: &'static str,
    req: reqwest::Request,
) -> Result<String> {
    let resp = client.execute(req).await?;
    let status = resp.status();

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        debug!(service, %status, "Error response received");
        return Err(AlertError::Api {
            service,
            status,
            body,
        });
    }

    let body = resp.text().await?;
    debug!(service, %status, bytes = body.len(), "Response received");
    Ok(body)
}

/// GETs `url` and decodes the JSON body as `T`.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(
    client: &C,
    service: &'static str,
    url: &str,
) -> Result<T> {
    let url = url
        .parse::<reqwest::Url>()
        .map_err(|e| AlertError::config(format!("invalid URL '{url}': {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let body = send_checked(client, service, req).await?;
    Ok(serde_json::from_str(&body)?)
}
