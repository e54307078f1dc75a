use crate::error::SchedulerError;
use crate::queue::TimerQueue;
use crate::task::{TaskDefinition, TaskOptions};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, trace};

/// Owns the task registry and keeps exactly one pending timer per active
/// task, re-arming after each fire according to the task's recurrence policy.
///
/// The registry is shared mutable state: timer fires run on the tokio
/// runtime's workers, so every registry read and write happens under one
/// mutex. Distinct tasks' callbacks may run concurrently; a single task's
/// never overlap, because each fire arms the next cycle before running its
/// own callback and the chain holds one pending timer at a time.
///
/// `C` is the context value handed to callbacks. Tasks registered without
/// their own context receive the scheduler-wide default, resolved at
/// registration time.
pub struct Scheduler<C> {
    inner: Arc<Inner<C>>,
}

struct Inner<C> {
    queue: TimerQueue,
    tasks: Mutex<HashMap<String, TaskDefinition<C>>>,
    default_context: Mutex<C>,
}

impl<C> Clone for Scheduler<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C> Scheduler<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// Create a scheduler. The default context is an explicit constructor
    /// dependency, substituted for any task registered without its own.
    pub fn new(default_context: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                queue: TimerQueue::new(),
                tasks: Mutex::new(HashMap::new()),
                default_context: Mutex::new(default_context),
            }),
        }
    }

    /// Replace the default context. Only tasks registered afterward see the
    /// new value; existing tasks keep the context they resolved at
    /// registration time.
    pub fn set_default_context(&self, context: C) {
        *self
            .inner
            .default_context
            .lock()
            .expect("default context lock poisoned") = context;
    }

    /// Register (or overwrite) a named recurring task and arm its first
    /// timer.
    ///
    /// Fails with [`SchedulerError::MissingOption`] when `name`, `frequency`
    /// or `callback` is absent; nothing is registered on failure.
    ///
    /// Overwriting a name does not cancel a timer already in flight for the
    /// previous definition; that timer re-enters the re-arm routine and
    /// proceeds against whatever the registry then holds.
    ///
    /// With `immediate` set, the callback is additionally invoked (and
    /// awaited) once before this call returns, independent of the timed
    /// firing.
    pub async fn schedule(&self, options: TaskOptions<C>) -> Result<(), SchedulerError> {
        let name = options.name.ok_or(SchedulerError::MissingOption("name"))?;
        let frequency = options
            .frequency
            .ok_or(SchedulerError::MissingOption("frequency"))?;
        let callback = options
            .callback
            .ok_or(SchedulerError::MissingOption("callback"))?;

        let context = match options.context {
            Some(context) => context,
            None => self
                .inner
                .default_context
                .lock()
                .expect("default context lock poisoned")
                .clone(),
        };

        let definition = TaskDefinition {
            name: name.clone(),
            frequency,
            begin_at: options.begin_at.unwrap_or_else(Utc::now),
            start_of: options.start_of,
            once: options.once,
            callback: callback.clone(),
            context: context.clone(),
        };

        debug!(
            task = %name,
            frequency = frequency.as_str(),
            once = definition.once,
            "scheduling task"
        );
        self.inner
            .tasks
            .lock()
            .expect("task registry lock poisoned")
            .insert(name.clone(), definition);

        Inner::arm(self.inner.clone(), name);

        if options.immediate {
            callback(context).await;
        }

        Ok(())
    }

    /// Remove a task from the registry. Stops future firings, not a timer
    /// already in flight: when that timer fires, the re-arm routine finds no
    /// entry and silently no-ops.
    pub fn unschedule(&self, name: &str) {
        let removed = self
            .inner
            .tasks
            .lock()
            .expect("task registry lock poisoned")
            .remove(name);
        if removed.is_some() {
            debug!(task = name, "unscheduled task");
        }
    }

    /// The next fire timestamp for a registered task: `begin_at` advanced by
    /// one frequency interval, then rounded to the start of the task's
    /// `start_of` unit when one is set.
    ///
    /// The anchor is always the task's original `begin_at`, never a running
    /// previous-fire time, so repeated calls return the identical timestamp.
    pub fn next_fire_time(&self, name: &str) -> Option<DateTime<Utc>> {
        self.inner
            .tasks
            .lock()
            .expect("task registry lock poisoned")
            .get(name)
            .map(next_fire)
    }

    /// Whether a definition is currently registered under `name`. A fired
    /// `once` task stays registered until explicitly unscheduled.
    pub fn is_scheduled(&self, name: &str) -> bool {
        self.inner
            .tasks
            .lock()
            .expect("task registry lock poisoned")
            .contains_key(name)
    }

    pub fn task_count(&self) -> usize {
        self.inner
            .tasks
            .lock()
            .expect("task registry lock poisoned")
            .len()
    }
}

/// Next fire computed from the definition's original anchor.
fn next_fire<C>(definition: &TaskDefinition<C>) -> DateTime<Utc> {
    let next = definition.frequency.advance(definition.begin_at);
    match definition.start_of {
        Some(unit) => unit.truncate(next),
        None => next,
    }
}

impl<C> Inner<C>
where
    C: Clone + Send + Sync + 'static,
{
    /// Arm one timer cycle for `name`. The chain carries the task name by
    /// value rather than borrowed scheduler state; a missing registry entry
    /// ends the chain, which is how `unschedule` takes effect.
    fn arm(inner: Arc<Self>, name: String) {
        let target = {
            let tasks = inner.tasks.lock().expect("task registry lock poisoned");
            match tasks.get(&name) {
                Some(definition) => next_fire(definition),
                None => {
                    trace!(task = %name, "arm skipped, no registry entry");
                    return;
                }
            }
        };

        let delay = inner.queue.compute_delay(target, None);
        trace!(task = %name, %target, ?delay, "arming timer");

        let queue = inner.queue;
        queue.add(move || Self::fire(inner, name), delay);
    }

    /// One timer fire for `name`. Repeating tasks re-arm the next cycle
    /// before their callback runs, so a slow callback stalls only its own
    /// chain. Callback failures are the host's concern; nothing here catches
    /// them.
    async fn fire(inner: Arc<Self>, name: String) {
        let entry = {
            let tasks = inner.tasks.lock().expect("task registry lock poisoned");
            tasks
                .get(&name)
                .map(|definition| {
                    (
                        definition.callback.clone(),
                        definition.context.clone(),
                        definition.once,
                    )
                })
        };

        let Some((callback, context, once)) = entry else {
            debug!(task = %name, "timer fired for unscheduled task, ignoring");
            return;
        };

        if once {
            debug!(task = %name, "one-shot task fired, not re-arming");
        } else {
            Self::arm(inner.clone(), name.clone());
        }

        callback(context).await;
    }
}
