use thiserror::Error;

/// Errors raised synchronously at `schedule` / delay-computation call sites.
///
/// These represent caller or configuration defects and propagate immediately
/// rather than being swallowed.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A required scheduling option was omitted.
    #[error("missing required option: {0}")]
    MissingOption(&'static str),

    /// A timestamp string could not be parsed as a calendar timestamp.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A frequency or rounding unit was not recognized.
    #[error("configuration error: {0}")]
    Configuration(String),
}
