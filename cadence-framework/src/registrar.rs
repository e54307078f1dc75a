use crate::message::Message;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback invoked when a bound command is dispatched.
pub type CommandCallback = Arc<dyn Fn(&Message) + Send + Sync>;

/// How a bound command behaves when dispatched. The callback is required by
/// construction; the rest defaults.
#[derive(Clone)]
pub struct CommandSpec {
    pub(crate) callback: CommandCallback,
    /// Uses per minute before a caller is throttled.
    pub rate_limit: u32,
    /// Help / usage information for the command.
    pub help_message: String,
    /// Whether the command can be used in a direct or group message.
    pub allow_dm: bool,
}

impl CommandSpec {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
            rate_limit: 3,
            help_message: "[undocumented]".to_string(),
            allow_dm: false,
        }
    }

    pub fn rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn help_message(mut self, help_message: impl Into<String>) -> Self {
        self.help_message = help_message.into();
        self
    }

    pub fn allow_dm(mut self, allow_dm: bool) -> Self {
        self.allow_dm = allow_dm;
        self
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("rate_limit", &self.rate_limit)
            .field("help_message", &self.help_message)
            .field("allow_dm", &self.allow_dm)
            .finish_non_exhaustive()
    }
}

/// Maps command names to their specs. Rebinding a name overwrites the prior
/// spec.
#[derive(Debug, Default)]
pub struct CommandRegistrar {
    commands: HashMap<String, CommandSpec>,
}

impl CommandRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a command under `name`.
    pub fn bind(&mut self, name: impl Into<String>, spec: CommandSpec) {
        self.commands.insert(name.into(), spec);
    }

    /// The spec bound under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    /// `(name, help_message)` pairs for every bound command, sorted by name.
    pub fn help(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .commands
            .iter()
            .map(|(name, spec)| (name.clone(), spec.help_message.clone()))
            .collect();
        entries.sort();
        entries
    }
}
