//! Logging capability with a `tracing` backed implementation

use serde::{Deserialize, Serialize};
use std::ops::BitOr;
use tracing::{debug, error, info, warn};

/// Severity levels; each is a distinct bit so levels combine into a [`LevelMask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Silent = 0,
    Error = 1,
    Warn = 1 << 1,
    Info = 1 << 2,
    Debug = 1 << 3,
}

impl LogLevel {
    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Set of enabled levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelMask(u8);

impl LevelMask {
    pub fn none() -> Self {
        LevelMask(0)
    }

    /// `level` and every more severe level
    pub fn up_to(level: LogLevel) -> Self {
        match level {
            LogLevel::Silent => LevelMask(0),
            other => LevelMask((other.bits() << 1) - 1),
        }
    }

    pub fn contains(self, level: LogLevel) -> bool {
        self.0 & level.bits() != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl From<LogLevel> for LevelMask {
    fn from(level: LogLevel) -> Self {
        LevelMask(level.bits())
    }
}

impl BitOr<LogLevel> for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        LevelMask(self.0 | rhs.bits())
    }
}

impl BitOr for LogLevel {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        LevelMask(self.bits() | rhs.bits())
    }
}

pub trait Logger {
    /// General output, reported at debug severity
    fn log(&self, message: &str);
    fn error(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to `tracing` events, dropping levels outside its mask
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: String,
    mask: LevelMask,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        TracingLogger {
            name: name.into(),
            mask: LevelMask::up_to(LogLevel::Debug),
        }
    }

    pub fn with_mask(mut self, mask: impl Into<LevelMask>) -> Self {
        self.mask = mask.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.mask.contains(level)
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        if self.enabled(LogLevel::Debug) {
            debug!(logger = %self.name, "{}", message);
        }
    }

    fn error(&self, message: &str) {
        if self.enabled(LogLevel::Error) {
            error!(logger = %self.name, "{}", message);
        }
    }

    fn info(&self, message: &str) {
        if self.enabled(LogLevel::Info) {
            info!(logger = %self.name, "{}", message);
        }
    }

    fn warn(&self, message: &str) {
        if self.enabled(LogLevel::Warn) {
            warn!(logger = %self.name, "{}", message);
        }
    }
}
