use crate::error::SchedulerError;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Opaque handle to one pending delayed invocation.
pub struct TimerHandle(JoinHandle<()>);

impl TimerHandle {
    /// Whether the timer has already run to completion or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// One-shot delayed-invocation primitive over the tokio timer facility.
///
/// Owns no task semantics: it arms a callback to run once after a delay and
/// converts absolute target timestamps into delay magnitudes. Recurrence and
/// the task registry live in [`crate::Scheduler`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerQueue;

impl TimerQueue {
    pub fn new() -> Self {
        Self
    }

    /// Arm a one-shot timer: after roughly `delay`, `callback` runs exactly
    /// once. Dropping the returned handle detaches the timer; it still fires.
    pub fn add<F, Fut>(&self, callback: F, delay: Duration) -> TimerHandle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        TimerHandle(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback().await;
        }))
    }

    /// Best-effort cancellation by handle. A timer that has already fired is
    /// left alone; cancellation racing an in-flight fire may lose.
    pub fn cancel(&self, handle: &TimerHandle) {
        handle.0.abort();
    }

    /// Delay until `target`, measured from `from` (now when omitted).
    /// Targets in the past clamp to zero: they fire as soon as possible
    /// rather than being dropped.
    pub fn compute_delay(&self, target: DateTime<Utc>, from: Option<DateTime<Utc>>) -> Duration {
        let from = from.unwrap_or_else(Utc::now);
        (target - from).to_std().unwrap_or(Duration::ZERO)
    }

    /// String-timestamp variant of [`TimerQueue::compute_delay`]. Fails with
    /// [`SchedulerError::InvalidTimestamp`] when `target` does not parse.
    pub fn compute_delay_str(
        &self,
        target: &str,
        from: Option<DateTime<Utc>>,
    ) -> Result<Duration, SchedulerError> {
        Ok(self.compute_delay(parse_timestamp(target)?, from))
    }

    /// Arm a one-shot timer for an absolute target timestamp.
    pub fn add_for_time<F, Fut>(&self, callback: F, target: DateTime<Utc>) -> TimerHandle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let delay = self.compute_delay(target, None);
        trace!(%target, ?delay, "arming timer for absolute target");
        self.add(callback, delay)
    }
}

/// Parse a calendar timestamp: RFC 3339 first, then the bare
/// `YYYY-MM-DD HH:MM:SS` form interpreted as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, SchedulerError> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| SchedulerError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().expect("test timestamp")
    }

    #[test]
    fn delay_is_exact_for_future_targets() {
        let queue = TimerQueue::new();
        let delay = queue.compute_delay(
            at("2024-01-01T00:01:00Z"),
            Some(at("2024-01-01T00:00:30Z")),
        );
        assert_eq!(delay, Duration::from_millis(30_000));
    }

    #[test]
    fn past_and_present_targets_clamp_to_zero() {
        let queue = TimerQueue::new();
        let now = at("2024-01-01T00:00:00Z");
        assert_eq!(queue.compute_delay(now, Some(now)), Duration::ZERO);
        assert_eq!(
            queue.compute_delay(at("2023-12-31T23:59:00Z"), Some(now)),
            Duration::ZERO
        );
    }

    #[test]
    fn parses_rfc3339_and_bare_timestamps() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00Z").unwrap(),
            at("2024-01-01T00:00:00Z")
        );
        assert_eq!(
            parse_timestamp("2024-01-01 13:45:00").unwrap(),
            at("2024-01-01T13:45:00Z")
        );
    }

    #[test]
    fn rejects_unparseable_timestamps() {
        let err = TimerQueue::new()
            .compute_delay_str("next tuesday-ish", None)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidTimestamp(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn armed_timer_fires_exactly_once() {
        let queue = TimerQueue::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in_timer = fired.clone();
        queue.add(
            move || async move {
                fired_in_timer.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_secs(5),
        );

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_a_pending_fire() {
        let queue = TimerQueue::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in_timer = fired.clone();
        let handle = queue.add(
            move || async move {
                fired_in_timer.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_secs(5),
        );

        queue.cancel(&handle);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fire_is_a_no_op() {
        let queue = TimerQueue::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_in_timer = fired.clone();
        let handle = queue.add(
            move || async move {
                fired_in_timer.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());

        queue.cancel(&handle);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn add_for_time_arms_against_wall_clock() {
        let queue = TimerQueue::new();
        let fired = Arc::new(AtomicUsize::new(0));

        // A target in the past arms with zero delay and fires right away.
        let fired_in_timer = fired.clone();
        queue.add_for_time(
            move || async move {
                fired_in_timer.fetch_add(1, Ordering::SeqCst);
            },
            Utc::now() - chrono::Duration::minutes(1),
        );

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
