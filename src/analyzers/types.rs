use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use super::classifier::Verdict;
use super::details::extract_details;
use crate::services::timeline_api::Post;

/// Format of `posted_at`, e.g. `Monday, 2025-03-10 08:15:02 AM EDT`.
pub const POSTED_AT_FORMAT: &str = "%A, %Y-%m-%d %I:%M:%S %p %Z";

/// Everything shown to an operator about one delay post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayStatus {
    pub post_id: String,
    pub posted_at: String,
    pub affected_line: String,
    pub time_in_alert: String,
    pub analysis: String,
    pub full_update: String,
}

impl DelayStatus {
    pub fn from_post(post: &Post, verdict: Verdict, tz: Tz) -> Self {
        let (affected_line, time_in_alert) = extract_details(&post.text);
        Self {
            post_id: post.id.clone(),
            posted_at: format_posted_at(&post.created_at, tz),
            affected_line,
            time_in_alert,
            analysis: verdict.message().to_string(),
            full_update: post.text.clone(),
        }
    }
}

/// Converts an API timestamp (`2025-03-10T12:15:02.000Z`) to `tz`.
///
/// Falls back to the raw string when it does not parse.
pub fn format_posted_at(created_at: &str, tz: Tz) -> String {
    match NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.fZ") {
        Ok(naive) => {
            let utc: DateTime<_> = naive.and_utc();
            utc.with_timezone(&tz).format(POSTED_AT_FORMAT).to_string()
        }
        Err(e) => {
            debug!(created_at, error = %e, "Unparseable timestamp, showing it verbatim");
            created_at.to_string()
        }
    }
}
