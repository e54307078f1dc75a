use thiserror::Error;

/// Framework-level configuration and lifecycle errors.
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// A required setting has no value and no schema default.
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    /// The underlying configuration source could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// `connect` was called before a configuration was loaded.
    #[error("framework is not configured")]
    NotConfigured,
}
