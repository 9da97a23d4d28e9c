// ABOUTME: Client log threshold and the notifications/message payloads sent to the client.
// ABOUTME: The client picks a threshold with logging/setLevel; Info until it does.

use parking_lot::Mutex;
use rmcp::model::{LoggingLevel, LoggingMessageNotificationParam};
use serde_json::Value;

/// Logger name attached to every client notification.
pub const LOGGER: &str = "docker-mcp";

/// Syslog rank of `level`, least severe first.
pub fn severity(level: LoggingLevel) -> u8 {
    match level {
        LoggingLevel::Debug => 0,
        LoggingLevel::Info => 1,
        LoggingLevel::Notice => 2,
        LoggingLevel::Warning => 3,
        LoggingLevel::Error => 4,
        LoggingLevel::Critical => 5,
        LoggingLevel::Alert => 6,
        LoggingLevel::Emergency => 7,
    }
}

/// Lowest level the client still wants to hear about.
#[derive(Debug)]
pub struct Threshold(Mutex<LoggingLevel>);

impl Default for Threshold {
    fn default() -> Self {
        Self(Mutex::new(LoggingLevel::Info))
    }
}

impl Threshold {
    pub fn get(&self) -> LoggingLevel {
        *self.0.lock()
    }

    pub fn set(&self, level: LoggingLevel) {
        *self.0.lock() = level;
    }

    /// A notification payload, or `None` when `level` is below the threshold.
    pub fn message(&self, level: LoggingLevel, data: Value) -> Option<LoggingMessageNotificationParam> {
        (severity(level) >= severity(self.get())).then(|| LoggingMessageNotificationParam {
            level,
            logger: Some(LOGGER.to_string()),
            data,
        })
    }
}
