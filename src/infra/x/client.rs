use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AlertError, Result};
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, fetch_json};
use crate::services::timeline_api::{Post, Timeline};

/// Posts requested per run; the API caps `max_results` at 100.
pub const MAX_RESULTS: u32 = 50;

const MISSING_TEXT: &str = "No text found.";
const MISSING_CREATED_AT: &str = "Unknown time";

/// Reads a user's timeline from the X (Twitter) v2 API.
pub struct XTimelineClient<C = ApiKey<BasicClient>> {
    http: C,
    base_url: String,
    account_id: String,
}

impl XTimelineClient {
    /// Fails with [`AlertError::Config`] when no bearer token is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config
            .bearer_token
            .as_deref()
            .ok_or_else(|| AlertError::config("BEARER_TOKEN is not set"))?;
        let http = ApiKey::bearer(BasicClient::new()?, token)?;
        Ok(Self::with_client(
            http,
            &config.timeline_base_url,
            &config.account_id,
        ))
    }
}

impl<C: HttpClient> XTimelineClient<C> {
    pub fn with_client(http: C, base_url: &str, account_id: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_id: account_id.to_string(),
        }
    }

    fn timeline_url(&self) -> String {
        format!(
            "{}/users/{}/tweets?max_results={}&tweet.fields=created_at",
            self.base_url, self.account_id, MAX_RESULTS
        )
    }
}

#[async_trait]
impl<C: HttpClient> Timeline for XTimelineClient<C> {
    #[tracing::instrument(skip(self), fields(account_id = %self.account_id))]
    async fn recent_posts(&self) -> Result<Vec<Post>> {
        let json: serde_json::Value = fetch_json(&self.http, "timeline", &self.timeline_url()).await?;
        let posts = parse_timeline(&json);
        debug!(count = posts.len(), "Timeline fetched");
        Ok(posts)
    }
}

/// Extracts posts from a timeline response body.
///
/// A body without a `data` array (the API omits it when the account has no
/// recent posts) yields an empty list. Entries without an `id` are dropped.
pub fn parse_timeline(json: &serde_json::Value) -> Vec<Post> {
    let Some(data) = json["data"].as_array() else {
        warn!("Timeline response has no data; it may be empty");
        return Vec::new();
    };

    data.iter()
        .filter_map(|item| {
            let id = item["id"].as_str()?.to_string();
            let text = item["text"].as_str().unwrap_or(MISSING_TEXT).to_string();
            let created_at = item["created_at"]
                .as_str()
                .unwrap_or(MISSING_CREATED_AT)
                .to_string();
            Some(Post {
                id,
                text,
                created_at,
            })
        })
        .collect()
}
