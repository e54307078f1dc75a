//! Cadence Framework - Event-driven chat-bot scaffolding
//!
//! Thin, stateless glue around the scheduling engine in `cadence-scheduler`:
//! configuration loading, a named-command registrar, a per-minute rate
//! auditor, inbound-message handler dispatch, and a [`Framework`] facade that
//! composes them behind the surface a platform connection talks to.
//!
//! The framework is platform-agnostic: inbound events arrive as plain
//! [`Message`] values and outbound behavior lives in the command and handler
//! callbacks the host registers.

mod auditor;
mod config;
mod error;
mod framework;
mod handler;
mod message;
mod registrar;

// Re-export public API
pub use auditor::RateAuditor;
pub use config::BotConfig;
pub use error::FrameworkError;
pub use framework::Framework;
pub use handler::{Handler, HandlerCallback, HandlerMap};
pub use message::{ChannelKind, Message};
pub use registrar::{CommandCallback, CommandRegistrar, CommandSpec};

// The scheduling engine is part of the framework surface.
pub use cadence_scheduler::{
    Frequency, Scheduler, SchedulerError, StartOf, TaskOptions, TimerQueue,
};
