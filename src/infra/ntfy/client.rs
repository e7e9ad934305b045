use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AlertError, Result};
use crate::fetch::{BasicClient, HttpClient, send_checked};
use crate::services::notify_api::{Delivery, Notification, Notifier};

/// Publishes notifications to an ntfy topic.
///
/// A client without a topic accepts every notification and reports
/// [`Delivery::Skipped`].
pub struct NtfyClient<C = BasicClient> {
    http: C,
    base_url: String,
    topic: Option<String>,
}

impl NtfyClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.ntfy_topic.is_none() {
            warn!("NTFY_TOPIC not set; notifications will be skipped");
        }
        Ok(Self::with_client(
            BasicClient::new()?,
            &config.ntfy_base_url,
            config.ntfy_topic.clone(),
        ))
    }
}

impl<C: HttpClient> NtfyClient<C> {
    pub fn with_client(http: C, base_url: &str, topic: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            topic,
        }
    }

    fn request(&self, topic: &str, notification: &Notification) -> Result<reqwest::Request> {
        let url = format!("{}/{}", self.base_url, topic)
            .parse::<reqwest::Url>()
            .map_err(|e| AlertError::config(format!("invalid ntfy URL: {e}")))?;

        let mut req = reqwest::Request::new(reqwest::Method::POST, url);
        let headers = req.headers_mut();
        headers.insert(
            HeaderName::from_static("title"),
            header_value(&notification.title)?,
        );
        headers.insert(
            HeaderName::from_static("tags"),
            header_value(&notification.tags)?,
        );
        *req.body_mut() = Some(notification.body.clone().into_bytes().into());
        Ok(req)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AlertError::config(format!("'{value}' is not a valid header value: {e}")))
}

#[async_trait]
impl<C: HttpClient> Notifier for NtfyClient<C> {
    #[tracing::instrument(skip_all, fields(title = %notification.title))]
    async fn notify(&self, notification: &Notification) -> Result<Delivery> {
        let Some(topic) = self.topic.as_deref() else {
            warn!("NTFY_TOPIC not set. Skipping notification.");
            return Ok(Delivery::Skipped);
        };

        let req = self.request(topic, notification)?;
        send_checked(&self.http, "ntfy", req).await?;
        info!(topic, "Notification sent");
        Ok(Delivery::Sent)
    }
}
