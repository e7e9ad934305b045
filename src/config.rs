//! Runtime settings, read from the environment once at startup.

use std::path::PathBuf;

use chrono_tz::Tz;
use tracing::warn;

/// The official PATH train account.
pub const DEFAULT_ACCOUNT_ID: &str = "39796874";
pub const DEFAULT_TIMELINE_BASE_URL: &str = "https://api.twitter.com/2";
pub const DEFAULT_NTFY_BASE_URL: &str = "https://ntfy.sh";
pub const DEFAULT_STATE_FILE: &str = "last_alert_id.txt";
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::America::New_York;

#[derive(Debug, Clone)]
pub struct Config {
    pub bearer_token: Option<String>,
    pub ntfy_topic: Option<String>,
    pub account_id: String,
    pub timeline_base_url: String,
    pub ntfy_base_url: String,
    pub state_file: PathBuf,
    pub display_tz: Tz,
}

impl Config {
    /// Reads every setting from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset and
    /// an unknown timezone falls back to [`DEFAULT_DISPLAY_TZ`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let display_tz = match get("DISPLAY_TZ") {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|e| {
                warn!(display_tz = %name, error = %e, "Unknown DISPLAY_TZ, using the default");
                DEFAULT_DISPLAY_TZ
            }),
            None => DEFAULT_DISPLAY_TZ,
        };

        Self {
            bearer_token: get("BEARER_TOKEN"),
            ntfy_topic: get("NTFY_TOPIC"),
            account_id: get("PATH_USER_ID").unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string()),
            timeline_base_url: get("TIMELINE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_TIMELINE_BASE_URL.to_string()),
            ntfy_base_url: get("NTFY_BASE_URL")
                .unwrap_or_else(|| DEFAULT_NTFY_BASE_URL.to_string()),
            state_file: get("STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE)),
            display_tz,
        }
    }
}
