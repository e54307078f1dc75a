use crate::auditor::RateAuditor;
use crate::config::BotConfig;
use crate::error::FrameworkError;
use crate::handler::HandlerMap;
use crate::message::{ChannelKind, Message};
use crate::registrar::{CommandRegistrar, CommandSpec};
use cadence_scheduler::Scheduler;
use tracing::{debug, info, warn};

/// Composes configuration, the command registrar, the rate auditor, event
/// handlers and the scheduler behind the surface a platform connection talks
/// to.
///
/// `C` is the context type shared with scheduled tasks and event handlers.
pub struct Framework<C> {
    config: Option<BotConfig>,
    registrar: CommandRegistrar,
    auditor: RateAuditor,
    handlers: HandlerMap<C>,
    scheduler: Scheduler<C>,
    active: bool,
}

impl<C> Framework<C>
where
    C: Clone + Send + Sync + 'static,
{
    pub fn new(default_context: C) -> Self {
        Self {
            config: None,
            registrar: CommandRegistrar::new(),
            auditor: RateAuditor::new(),
            handlers: HandlerMap::new(),
            scheduler: Scheduler::new(default_context),
            active: false,
        }
    }

    /// Load settings into the framework. Must happen before `connect`.
    pub fn configure(&mut self, config: BotConfig) {
        self.config = Some(config);
    }

    /// Whether the framework considers itself connected to the platform.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Bind a command under `name`.
    pub fn bind(&mut self, name: impl Into<String>, spec: CommandSpec) {
        self.registrar.bind(name, spec);
    }

    /// Start observing a named event.
    pub fn observe<F>(&mut self, event: impl Into<String>, callback: F)
    where
        F: Fn(&Message, Option<&C>) + Send + Sync + 'static,
    {
        self.handlers.add(event, callback);
    }

    /// Route an inbound event to its observed handler, if any.
    pub fn emit(&self, event: &str, msg: &Message) {
        if let Some(handler) = self.handlers.get(event) {
            (handler.callback)(msg, handler.context.as_ref());
        }
    }

    /// The recurring-task scheduler owned by this framework.
    pub fn scheduler(&self) -> &Scheduler<C> {
        &self.scheduler
    }

    pub fn registrar(&self) -> &CommandRegistrar {
        &self.registrar
    }

    /// Mark the framework connected. The actual network session belongs to
    /// the platform connection; this gates dispatch on a loaded
    /// configuration, logs the boot message and flips the active flag.
    pub fn connect(&mut self) -> Result<(), FrameworkError> {
        let config = self.config.as_ref().ok_or(FrameworkError::NotConfigured)?;

        info!(boot_msg = %config.boot_msg, "connected");
        if let Some(playing_msg) = &config.playing_msg {
            info!(playing = %playing_msg, "presence set");
        }

        self.active = true;
        Ok(())
    }

    /// Mark the framework disconnected.
    pub fn disconnect(&mut self) {
        self.active = false;
        info!("disconnected");
    }

    /// Route an inbound message through the command pipeline: channel
    /// allow-list, bot-author filter, prefix parse, lookup, DM policy and
    /// rate audit, then the command callback. Messages that fail any filter
    /// are dropped quietly.
    pub fn dispatch_command(&mut self, msg: &Message) {
        let Some(config) = &self.config else {
            debug!("dropping message, framework not configured");
            return;
        };

        // The channel allow-list applies to text channels only.
        if !config.allowed_channels.is_empty()
            && msg.channel_kind == ChannelKind::Text
            && !config.allowed_channels.contains(&msg.channel)
        {
            debug!(channel = %msg.channel, "dropping message from disallowed channel");
            return;
        }

        if msg.author_is_bot && !config.respond_to_bots {
            return;
        }

        let Some(stripped) = msg.content.strip_prefix(&config.command_prefix) else {
            return;
        };
        let name = stripped
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();

        let Some(spec) = self.registrar.lookup(&name) else {
            debug!(command = %name, "unknown command");
            return;
        };
        let callback = spec.callback.clone();
        let rate_limit = spec.rate_limit;
        let allow_dm = spec.allow_dm;

        if matches!(msg.channel_kind, ChannelKind::Dm | ChannelKind::Group) && !allow_dm {
            debug!(command = %name, "command not allowed in direct messages");
            return;
        }

        if !self.auditor.permitted(&msg.author_id, &name, rate_limit) {
            warn!(command = %name, user = %msg.author_id, "rate limited");
            return;
        }
        self.auditor.track(&msg.author_id, &name);

        callback(msg);
    }
}
