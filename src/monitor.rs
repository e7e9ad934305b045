//! One polling run: fetch, classify, alert, remember.

use chrono_tz::Tz;
use tracing::{debug, error, info, warn};

use crate::analyzers::{DelayStatus, classify};
use crate::error::Result;
use crate::infra::state::MarkerStore;
use crate::output::{build_alert, log_timeline};
use crate::services::notify_api::{Delivery, Notifier};
use crate::services::timeline_api::Timeline;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The timeline came back empty; the marker was left alone.
    NoPosts,
    /// The newest post was already evaluated by an earlier run.
    Duplicate { id: String },
    /// The newest post is a delay and an alert was attempted.
    Alerted { id: String, delivered: bool },
    /// The newest post is not a delay.
    Quiet { id: String },
}

pub struct Monitor<T, N, S> {
    timeline: T,
    notifier: N,
    store: S,
    display_tz: Tz,
    dry_run: bool,
}

impl<T, N, S> Monitor<T, N, S>
where
    T: Timeline,
    N: Notifier,
    S: MarkerStore,
{
    pub fn new(timeline: T, notifier: N, store: S, display_tz: Tz) -> Self {
        Self {
            timeline,
            notifier,
            store,
            display_tz,
            dry_run: false,
        }
    }

    /// Evaluates everything but neither notifies nor writes the marker.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Performs a single run.
    ///
    /// Errors from the timeline or from reading the marker abort the run
    /// before the marker is touched. A failed notification is logged and the
    /// marker is still updated; a failed marker write is logged and the
    /// outcome is still returned.
    #[tracing::instrument(skip(self), fields(dry_run = self.dry_run))]
    pub async fn run_once(&self) -> Result<RunOutcome> {
        let posts = self.timeline.recent_posts().await?;
        let Some(newest) = posts.first() else {
            warn!("Could not retrieve any posts; the response may be empty");
            return Ok(RunOutcome::NoPosts);
        };
        info!(count = posts.len(), newest_id = %newest.id, "Posts fetched");

        let marker = self.store.read().await?;
        if marker.as_deref() == Some(newest.id.as_str()) {
            info!(id = %newest.id, "Newest post already evaluated, nothing to do");
            return Ok(RunOutcome::Duplicate {
                id: newest.id.clone(),
            });
        }

        let delays: Vec<DelayStatus> = posts
            .iter()
            .filter_map(|post| {
                let verdict = classify(&post.text);
                debug!(post_id = %post.id, ?verdict, "Post classified");
                verdict
                    .is_delay()
                    .then(|| DelayStatus::from_post(post, verdict, self.display_tz))
            })
            .collect();

        let newest_delay = delays.first().filter(|s| s.post_id == newest.id);
        let outcome = match newest_delay {
            Some(status) => {
                info!(
                    post_id = %status.post_id,
                    line = %status.affected_line,
                    time = %status.time_in_alert,
                    "New delay detected"
                );
                let delivered = self.send_alert(status).await;
                RunOutcome::Alerted {
                    id: newest.id.clone(),
                    delivered,
                }
            }
            None => {
                info!(post_id = %newest.id, "Newest post is not a delay, no alert");
                RunOutcome::Quiet {
                    id: newest.id.clone(),
                }
            }
        };

        log_timeline(&delays);

        if self.dry_run {
            info!(id = %newest.id, "Dry run, marker not written");
        } else if let Err(e) = self.store.write(&newest.id).await {
            error!(
                id = %newest.id,
                error = %e,
                "Failed to write marker; the next run may repeat this decision"
            );
        } else {
            info!(id = %newest.id, "Marker updated");
        }

        Ok(outcome)
    }

    /// Returns `true` only when the notification was actually delivered.
    async fn send_alert(&self, status: &DelayStatus) -> bool {
        let alert = build_alert(status);
        if self.dry_run {
            info!(title = %alert.title, "Dry run, notification not sent");
            return false;
        }

        match self.notifier.notify(&alert).await {
            Ok(Delivery::Sent) => true,
            Ok(Delivery::Skipped) => false,
            Err(e) => {
                error!(error = %e, "Failed to send notification");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlertError;
    use crate::services::notify_api::Notification;
    use crate::services::timeline_api::Post;
    use std::sync::Mutex;

    struct FixedTimeline(Vec<Post>);

    #[async_trait::async_trait]
    impl Timeline for FixedTimeline {
        async fn recent_posts(&self) -> Result<Vec<Post>> {
            Ok(self.0.clone())
        }
    }

    struct FailingTimeline;

    #[async_trait::async_trait]
    impl Timeline for FailingTimeline {
        async fn recent_posts(&self) -> Result<Vec<Post>> {
            Err(AlertError::config("BEARER_TOKEN is not set"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<Notification> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: &Notification) -> Result<Delivery> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                return Err(AlertError::config("ntfy unreachable"));
            }
            Ok(Delivery::Sent)
        }
    }

    #[derive(Default)]
    struct MemoryStore(Mutex<Option<String>>);

    impl MemoryStore {
        fn with(id: &str) -> Self {
            Self(Mutex::new(Some(id.to_string())))
        }

        fn current(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl MarkerStore for MemoryStore {
        async fn read(&self) -> Result<Option<String>> {
            Ok(self.current())
        }

        async fn write(&self, id: &str) -> Result<()> {
            *self.0.lock().unwrap() = Some(id.to_string());
            Ok(())
        }
    }

    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl MarkerStore for ReadOnlyStore {
        async fn read(&self) -> Result<Option<String>> {
            Ok(Some("70".to_string()))
        }

        async fn write(&self, _id: &str) -> Result<()> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    fn post(id: &str, text: &str) -> Post {
        Post::new(id, text, "2025-03-10T12:15:02.000Z")
    }

    fn monitor<T: Timeline>(
        timeline: T,
        store: MemoryStore,
    ) -> Monitor<T, RecordingNotifier, MemoryStore> {
        Monitor::new(
            timeline,
            RecordingNotifier::default(),
            store,
            chrono_tz::America::New_York,
        )
    }

    #[tokio::test]
    async fn test_new_delay_sends_one_alert_and_updates_marker() {
        let timeline = FixedTimeline(vec![
            post("12", "HOB-WTC trains delayed, next train 10:53 AM"),
            post("11", "Good morning"),
        ]);
        let m = monitor(timeline, MemoryStore::with("11"));

        let outcome = m.run_once().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Alerted {
                id: "12".into(),
                delivered: true
            }
        );
        let sent = m.notifier().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].title, "PATH delay: HOB-WTC at 10:53 AM");
        assert_eq!(sent[0].body, "HOB-WTC trains delayed, next train 10:53 AM");
        assert_eq!(m.store().current().as_deref(), Some("12"));
    }

    #[tokio::test]
    async fn test_non_delay_newest_is_quiet_but_updates_marker() {
        let timeline = FixedTimeline(vec![
            post("21", "JSQ-33 service has resumed"),
            post("20", "JSQ-33 service suspended"),
        ]);
        let m = monitor(timeline, MemoryStore::with("19"));

        let outcome = m.run_once().await.unwrap();

        assert_eq!(outcome, RunOutcome::Quiet { id: "21".into() });
        assert!(m.notifier().sent().is_empty());
        assert_eq!(m.store().current().as_deref(), Some("21"));
    }

    #[tokio::test]
    async fn test_second_run_with_same_newest_is_duplicate() {
        let timeline = FixedTimeline(vec![post("31", "NWK-WTC delayed")]);
        let m = monitor(timeline, MemoryStore::default());

        let first = m.run_once().await.unwrap();
        let second = m.run_once().await.unwrap();

        assert!(matches!(first, RunOutcome::Alerted { .. }));
        assert_eq!(second, RunOutcome::Duplicate { id: "31".into() });
        assert_eq!(m.notifier().sent().len(), 1);
        assert_eq!(m.store().current().as_deref(), Some("31"));
    }

    #[tokio::test]
    async fn test_older_delay_does_not_alert() {
        let timeline = FixedTimeline(vec![
            post("41", "Weekend schedule reminder"),
            post("40", "HOB-33 advisory in effect"),
        ]);
        let m = monitor(timeline, MemoryStore::default());

        assert_eq!(
            m.run_once().await.unwrap(),
            RunOutcome::Quiet { id: "41".into() }
        );
        assert!(m.notifier().sent().is_empty());
    }

    #[tokio::test]
    async fn test_failed_notification_still_updates_marker() {
        let timeline = FixedTimeline(vec![post("51", "Heads up: JSQ-33 delayed")]);
        let m = Monitor::new(
            timeline,
            RecordingNotifier::failing(),
            MemoryStore::default(),
            chrono_tz::America::New_York,
        );

        let outcome = m.run_once().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Alerted {
                id: "51".into(),
                delivered: false
            }
        );
        assert_eq!(m.notifier().sent().len(), 1);
        assert_eq!(m.store().current().as_deref(), Some("51"));
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_marker_untouched() {
        let m = monitor(FailingTimeline, MemoryStore::with("7"));

        assert!(m.run_once().await.is_err());
        assert!(m.notifier().sent().is_empty());
        assert_eq!(m.store().current().as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_empty_timeline_leaves_marker_untouched() {
        let m = monitor(FixedTimeline(vec![]), MemoryStore::with("7"));

        assert_eq!(m.run_once().await.unwrap(), RunOutcome::NoPosts);
        assert_eq!(m.store().current().as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn test_dry_run_neither_sends_nor_writes() {
        let timeline = FixedTimeline(vec![post("61", "HOB-WTC suspended")]);
        let m = monitor(timeline, MemoryStore::with("60")).dry_run(true);

        let outcome = m.run_once().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Alerted {
                id: "61".into(),
                delivered: false
            }
        );
        assert!(m.notifier().sent().is_empty());
        assert_eq!(m.store().current().as_deref(), Some("60"));
    }

    #[tokio::test]
    async fn test_marker_write_failure_still_reports_alert() {
        let timeline = FixedTimeline(vec![post("71", "HOB-WTC suspended at 8:10 AM")]);
        let m = Monitor::new(
            timeline,
            RecordingNotifier::default(),
            ReadOnlyStore,
            chrono_tz::America::New_York,
        );

        let outcome = m.run_once().await.unwrap();

        assert_eq!(
            outcome,
            RunOutcome::Alerted {
                id: "71".into(),
                delivered: true
            }
        );
        assert_eq!(m.notifier().sent().len(), 1);
    }
}
