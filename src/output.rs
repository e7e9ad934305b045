//! Operator-facing rendering of delay statuses and the alert payload.

use tracing::{debug, info};

use crate::analyzers::DelayStatus;
use crate::services::notify_api::Notification;

const LABEL_WIDTH: usize = 15;
const SEPARATOR_WIDTH: usize = 80;

/// Builds the push notification for the newest delay post.
///
/// The title carries the extracted line and time (`N/A` when absent); the
/// body is the full post text.
pub fn build_alert(status: &DelayStatus) -> Notification {
    Notification::new(
        format!(
            "PATH delay: {} at {}",
            status.affected_line, status.time_in_alert
        ),
        status.full_update.clone(),
    )
}

/// Renders `statuses` (newest first, as fetched) as an oldest-first timeline.
pub fn render_timeline(statuses: &[DelayStatus]) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    for status in statuses.iter().rev() {
        out.push_str(&separator);
        out.push('\n');
        for (label, value) in [
            ("Posted At", &status.posted_at),
            ("Affected Line", &status.affected_line),
            ("Time in Alert", &status.time_in_alert),
            ("Full Update", &status.full_update),
        ] {
            out.push_str(&format!("{label:<LABEL_WIDTH$}: {value}\n"));
        }
    }
    out.push_str(&separator);
    out
}

/// Logs the delay timeline, or a single line when there is nothing to show.
pub fn log_timeline(statuses: &[DelayStatus]) {
    if statuses.is_empty() {
        info!("No delays found in the latest posts");
        return;
    }

    info!(
        count = statuses.len(),
        "Delay timeline\n{}",
        render_timeline(statuses)
    );
    for status in statuses.iter().rev() {
        if let Ok(json) = serde_json::to_string(status) {
            debug!(status = %json, "Delay status");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(id: &str, line: &str, time: &str, text: &str) -> DelayStatus {
        DelayStatus {
            post_id: id.to_string(),
            posted_at: format!("posted {id}"),
            affected_line: line.to_string(),
            time_in_alert: time.to_string(),
            analysis: "Potential delay or service change detected.".to_string(),
            full_update: text.to_string(),
        }
    }

    #[test]
    fn test_build_alert() {
        let alert = build_alert(&status("1", "HOB-WTC", "10:53 AM", "HOB-WTC delayed"));
        assert_eq!(alert.title, "PATH delay: HOB-WTC at 10:53 AM");
        assert_eq!(alert.body, "HOB-WTC delayed");
        assert_eq!(alert.tags, "train");
    }

    #[test]
    fn test_render_timeline_is_oldest_first() {
        let statuses = vec![
            status("2", "JSQ-33", "N/A", "newer delay"),
            status("1", "HOB-WTC", "8:00 AM", "older delay"),
        ];
        let rendered = render_timeline(&statuses);

        let older = rendered.find("older delay").unwrap();
        let newer = rendered.find("newer delay").unwrap();
        assert!(older < newer);
        assert!(rendered.contains("Affected Line  : HOB-WTC\n"));
        assert!(rendered.contains("Time in Alert  : 8:00 AM\n"));
        assert!(rendered.starts_with(&"-".repeat(80)));
        assert!(rendered.ends_with(&"-".repeat(80)));
    }

    #[test]
    fn test_log_timeline_does_not_panic() {
        log_timeline(&[]);
        log_timeline(&[status("1", "N/A", "N/A", "advisory")]);
    }
}
