use crate::frequency::{Frequency, StartOf};
use chrono::{DateTime, Utc};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Callback invoked with the task's context on every fire.
pub type TaskCallback<C> =
    Arc<dyn Fn(C) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Options for registering a recurring task.
///
/// `name`, `frequency` and `callback` are required; [`crate::Scheduler::schedule`]
/// rejects options missing any of them. Everything else defaults:
///
/// - `begin_at`: the time of registration
/// - `context`: the scheduler's default context
/// - `immediate`: false
/// - `once`: false
/// - `start_of`: no rounding
pub struct TaskOptions<C> {
    pub(crate) name: Option<String>,
    pub(crate) frequency: Option<Frequency>,
    pub(crate) callback: Option<TaskCallback<C>>,
    pub(crate) begin_at: Option<DateTime<Utc>>,
    pub(crate) context: Option<C>,
    pub(crate) immediate: bool,
    pub(crate) once: bool,
    pub(crate) start_of: Option<StartOf>,
}

impl<C> Default for TaskOptions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TaskOptions<C> {
    pub fn new() -> Self {
        Self {
            name: None,
            frequency: None,
            callback: None,
            begin_at: None,
            context: None,
            immediate: false,
            once: false,
            start_of: None,
        }
    }

    /// Registry key for the task. Registering again under the same name
    /// replaces the prior definition.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// How often the task fires.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// The callback to fire for the task.
    pub fn callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.callback = Some(Arc::new(move |ctx| Box::pin(callback(ctx))));
        self
    }

    /// Anchor timestamp the next fire time is computed from.
    pub fn begin_at(mut self, begin_at: DateTime<Utc>) -> Self {
        self.begin_at = Some(begin_at);
        self
    }

    /// Context passed to the callback instead of the scheduler default.
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Fire once synchronously at registration, in addition to the normal
    /// timed firing.
    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Fire exactly once and never re-arm.
    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    /// Round the computed fire time to the start of this calendar unit.
    pub fn start_of(mut self, start_of: StartOf) -> Self {
        self.start_of = Some(start_of);
        self
    }
}

/// A validated registry entry. Context and anchor are resolved at
/// registration time and never change afterward.
#[derive(Clone)]
pub struct TaskDefinition<C> {
    pub name: String,
    pub frequency: Frequency,
    pub begin_at: DateTime<Utc>,
    pub start_of: Option<StartOf>,
    pub once: bool,
    pub(crate) callback: TaskCallback<C>,
    pub(crate) context: C,
}

impl<C> fmt::Debug for TaskDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("name", &self.name)
            .field("frequency", &self.frequency)
            .field("begin_at", &self.begin_at)
            .field("start_of", &self.start_of)
            .field("once", &self.once)
            .finish_non_exhaustive()
    }
}
