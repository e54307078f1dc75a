use crate::error::FrameworkError;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_boot_msg() -> String {
    "Connected!".to_string()
}

/// Bot settings. Every field except `secret_key` has a schema default.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The secret key the bot logs in with.
    pub secret_key: String,

    /// The prefix that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Text channels the bot may respond in. Empty means all channels.
    #[serde(default)]
    pub allowed_channels: Vec<String>,

    /// Whether the bot acts on messages authored by other bots.
    #[serde(default)]
    pub respond_to_bots: bool,

    /// Message logged when the bot connects.
    #[serde(default = "default_boot_msg")]
    pub boot_msg: String,

    /// Presence line shown while connected.
    #[serde(default)]
    pub playing_msg: Option<String>,
}

impl BotConfig {
    /// Load from a specific TOML file, with a `BOT_`-prefixed environment
    /// variable overlay.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, FrameworkError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("BOT").separator("__"))
            .build()?;
        Self::from_config(config)
    }

    /// Load from a specific YAML file, with a `BOT_`-prefixed environment
    /// variable overlay.
    pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Self, FrameworkError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
            .add_source(Environment::with_prefix("BOT").separator("__"))
            .build()?;
        Self::from_config(config)
    }

    /// Resolve a built [`Config`] against the schema. `secret_key` is the
    /// one option with no default; its absence is reported by name.
    pub fn from_config(config: Config) -> Result<Self, FrameworkError> {
        if config.get_string("secret_key").is_err() {
            return Err(FrameworkError::MissingSetting("secret_key"));
        }
        Ok(config.try_deserialize()?)
    }
}
