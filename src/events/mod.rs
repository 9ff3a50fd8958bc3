//! Logging and event-listener capabilities

pub mod logger;
pub mod emitter;

pub use logger::{LevelMask, LogLevel, Logger, TracingLogger};
pub use emitter::{Emitter, EventEmitter, Listener, ListenerId};
