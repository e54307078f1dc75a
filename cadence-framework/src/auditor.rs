use chrono::{DateTime, Timelike, Utc};
use std::collections::{HashMap, VecDeque};

/// Maximum number of minute buckets kept in the audit history.
const AUDIT_BACKLOG: usize = 10;

/// Per-minute audit of caller-triggered command usage, used to throttle how
/// often a caller may trigger an action.
///
/// Usage is counted in wall-clock minute buckets keyed by `user|command`;
/// only the current minute's count is consulted when deciding whether a call
/// is permitted, and the history is capped at a small backlog.
#[derive(Debug, Default)]
pub struct RateAuditor {
    buckets: VecDeque<(String, HashMap<String, u32>)>,
}

impl RateAuditor {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_key(at: DateTime<Utc>) -> String {
        format!("{:02}{:02}", at.hour(), at.minute())
    }

    fn usage_key(user: &str, command: &str) -> String {
        format!("{}|{}", user, command)
    }

    /// Record that `user` used `command` now.
    pub fn track(&mut self, user: &str, command: &str) {
        self.track_at(user, command, Utc::now());
    }

    /// Record a use at an explicit time.
    pub fn track_at(&mut self, user: &str, command: &str, at: DateTime<Utc>) {
        let bucket_key = Self::bucket_key(at);
        let usage_key = Self::usage_key(user, command);

        match self.buckets.back_mut() {
            Some((key, bucket)) if *key == bucket_key => {
                *bucket.entry(usage_key).or_insert(0) += 1;
            }
            _ => {
                let mut bucket = HashMap::new();
                bucket.insert(usage_key, 1);
                self.buckets.push_back((bucket_key, bucket));
                if self.buckets.len() > AUDIT_BACKLOG {
                    self.buckets.pop_front();
                }
            }
        }
    }

    /// Whether `user` is still under `threshold` uses of `command` in the
    /// current minute.
    pub fn permitted(&self, user: &str, command: &str, threshold: u32) -> bool {
        self.permitted_at(user, command, threshold, Utc::now())
    }

    /// [`RateAuditor::permitted`] evaluated at an explicit time.
    pub fn permitted_at(
        &self,
        user: &str,
        command: &str,
        threshold: u32,
        at: DateTime<Utc>,
    ) -> bool {
        let bucket_key = Self::bucket_key(at);
        let usage_key = Self::usage_key(user, command);
        let occurrences = self
            .buckets
            .iter()
            .find(|(key, _)| *key == bucket_key)
            .and_then(|(_, bucket)| bucket.get(&usage_key))
            .copied()
            .unwrap_or(0);
        occurrences <= threshold
    }
}
