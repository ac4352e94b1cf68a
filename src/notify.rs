//! Notification Relay - Transient Toast Channel
//!
//! Fire-and-forget output channel for user-facing toasts. The storefront
//! emits; whoever hosts the page decides how a toast is shown and how long
//! it lives.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Toast severity, matching the page's alert styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transient notification event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: &str, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            message: message.to_string(),
            raised_at: Utc::now(),
        }
    }
}

/// Receives notifications. Fire-and-forget: no return value, delivery is the
/// relay's problem.
pub trait NotificationRelay: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Relay that forwards toasts to the log stream.
#[derive(Debug, Default)]
pub struct TracingRelay;

impl NotificationRelay for TracingRelay {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(severity = %severity, "{}", message),
            Severity::Warning => tracing::warn!(severity = %severity, "{}", message),
            Severity::Info | Severity::Success => {
                tracing::info!(severity = %severity, "{}", message)
            }
        }
    }
}

/// Relay that buffers notifications for later inspection.
///
/// Used by tests to assert on purchase events and by callers that render
/// toasts after the fact.
#[derive(Debug, Default)]
pub struct MemoryRelay {
    buffer: Mutex<Vec<Notification>>,
}

impl MemoryRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything relayed so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.buffer.lock().unwrap())
    }
}

impl NotificationRelay for MemoryRelay {
    fn notify(&self, message: &str, severity: Severity) {
        self.buffer
            .lock()
            .unwrap()
            .push(Notification::new(message, severity));
    }
}
