//! Named-event listener registry

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

pub type Listener = Box<dyn FnMut(&[Value])>;

/// Handle returned when a listener is registered, used to remove it again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub trait EventEmitter {
    fn on(&mut self, event: &str, listener: Listener) -> ListenerId;

    /// Register a listener that is removed after its first call
    fn once(&mut self, event: &str, listener: Listener) -> ListenerId;

    /// Remove a listener; returns whether it was registered for `event`
    fn off(&mut self, event: &str, id: ListenerId) -> bool;

    /// Call every listener of `event` in registration order; returns whether there were any
    fn emit(&mut self, event: &str, args: &[Value]) -> bool;

    /// Remove the listeners of one event, or of all events when `event` is `None`
    fn remove_all_listeners(&mut self, event: Option<&str>);

    /// Listener count per event above which registration logs a warning; 0 means unbounded
    fn set_max_listeners(&mut self, max: usize);

    fn max_listeners(&self) -> usize;
}

struct Registration {
    id: ListenerId,
    once: bool,
    listener: Listener,
}

/// In-memory [`EventEmitter`]
pub struct Emitter {
    listeners: HashMap<String, Vec<Registration>>,
    next_id: u64,
    max_listeners: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Self::with_max_listeners(0)
    }

    pub fn with_max_listeners(max: usize) -> Self {
        let mut emitter = Emitter {
            listeners: HashMap::new(),
            next_id: 0,
            max_listeners: usize::MAX,
        };
        emitter.set_max_listeners(max);
        emitter
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }

    fn register(&mut self, event: &str, listener: Listener, once: bool) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);

        let registered = self.listeners.entry(event.to_string()).or_default();
        if registered.len() >= self.max_listeners {
            warn!(
                event,
                count = registered.len() + 1,
                max = self.max_listeners,
                "listener count exceeds maximum, possible leak"
            );
        }
        registered.push(Registration { id, once, listener });
        id
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(event, registered)| (event.as_str(), registered.len()))
            .collect();
        f.debug_struct("Emitter")
            .field("listeners", &counts)
            .field("max_listeners", &self.max_listeners)
            .finish()
    }
}

impl EventEmitter for Emitter {
    fn on(&mut self, event: &str, listener: Listener) -> ListenerId {
        self.register(event, listener, false)
    }

    fn once(&mut self, event: &str, listener: Listener) -> ListenerId {
        self.register(event, listener, true)
    }

    fn off(&mut self, event: &str, id: ListenerId) -> bool {
        let Some(registered) = self.listeners.get_mut(event) else {
            return false;
        };
        let before = registered.len();
        registered.retain(|r| r.id != id);
        let removed = registered.len() != before;
        if registered.is_empty() {
            self.listeners.remove(event);
        }
        removed
    }

    fn emit(&mut self, event: &str, args: &[Value]) -> bool {
        let Some(registered) = self.listeners.get_mut(event) else {
            return false;
        };
        for registration in registered.iter_mut() {
            (registration.listener)(args);
        }
        registered.retain(|r| !r.once);
        if registered.is_empty() {
            self.listeners.remove(event);
        }
        true
    }

    fn remove_all_listeners(&mut self, event: Option<&str>) {
        match event {
            Some(event) => {
                self.listeners.remove(event);
            }
            None => self.listeners.clear(),
        }
    }

    fn set_max_listeners(&mut self, max: usize) {
        self.max_listeners = if max == 0 { usize::MAX } else { max };
    }

    fn max_listeners(&self) -> usize {
        self.max_listeners
    }
}
