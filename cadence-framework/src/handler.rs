use crate::message::Message;
use std::collections::HashMap;
use std::sync::Arc;

/// Callback for a named event handler. Receives the inbound message and the
/// handler's own context, when one was registered.
pub type HandlerCallback<C> = Arc<dyn Fn(&Message, Option<&C>) + Send + Sync>;

/// One registered event handler.
#[derive(Clone)]
pub struct Handler<C> {
    pub callback: HandlerCallback<C>,
    pub context: Option<C>,
}

/// Named inbound-event handlers: the message-dispatch collaborator. Routing
/// an event to its handler is a plain map lookup; the framework owns when
/// handlers run.
pub struct HandlerMap<C> {
    handlers: HashMap<String, Handler<C>>,
}

impl<C> Default for HandlerMap<C> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<C> HandlerMap<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `event` with no context of its own.
    pub fn add<F>(&mut self, event: impl Into<String>, callback: F)
    where
        F: Fn(&Message, Option<&C>) + Send + Sync + 'static,
    {
        self.handlers.insert(
            event.into(),
            Handler {
                callback: Arc::new(callback),
                context: None,
            },
        );
    }

    /// Register a handler carrying its own context value.
    pub fn add_with_context<F>(&mut self, event: impl Into<String>, callback: F, context: C)
    where
        F: Fn(&Message, Option<&C>) + Send + Sync + 'static,
    {
        self.handlers.insert(
            event.into(),
            Handler {
                callback: Arc::new(callback),
                context: Some(context),
            },
        );
    }

    /// Remove the handler for `event`. Returns whether one was registered.
    pub fn remove(&mut self, event: &str) -> bool {
        self.handlers.remove(event).is_some()
    }

    pub fn get(&self, event: &str) -> Option<&Handler<C>> {
        self.handlers.get(event)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler<C>)> {
        self.handlers
            .iter()
            .map(|(event, handler)| (event.as_str(), handler))
    }
}
