//! Notification sinks
//!
//! Delivery is best-effort: a failed sink is logged and the run continues.

use std::fmt;
use std::io::{self, Write};
use std::process::Command;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::formatter::Notification;
use crate::observability::{log_event_with_fields, Event, Logger, Severity};

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to launch notifier '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Notifier '{program}' exited with status {status}")]
    Exit { program: String, status: String },

    #[error("Failed to write notification: {0}")]
    Write(#[from] io::Error),
}

/// Capability that shows a notification to the user.
pub trait NotificationSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Hands a notification to the sink. Returns whether delivery succeeded.
pub fn deliver(sink: &dyn NotificationSink, notification: &Notification) -> bool {
    match sink.notify(notification) {
        Ok(()) => {
            log_event_with_fields(Event::NotificationSent, &[("sink", sink.name())]);
            true
        }
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(
                Event::NotificationFailed,
                &[("sink", sink.name()), ("reason", reason.as_str())],
            );
            false
        }
    }
}

/// Desktop notification through the freedesktop `notify-send` tool.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    program: String,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::with_program("notify-send")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for DesktopNotifier {
    fn name(&self) -> &'static str {
        "desktop"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let expire_ms = u64::from(notification.timeout_secs) * 1000;
        let status = Command::new(&self.program)
            .arg("--app-name")
            .arg(&notification.app_name)
            .arg("--expire-time")
            .arg(expire_ms.to_string())
            .arg(&notification.title)
            .arg(&notification.message)
            .status()
            .map_err(|source| NotifyError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Exit {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Writes the notification as a structured log line on stderr.
///
/// Bypasses the `log_level` filter: a notification is never silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn write_to<W: Write>(
        &self,
        notification: &Notification,
        writer: &mut W,
    ) -> Result<(), NotifyError> {
        let timeout = notification.timeout_secs.to_string();
        Logger::write_line(
            Severity::Warn,
            "NOTIFICATION",
            &[
                ("app_name", notification.app_name.as_str()),
                ("message", notification.message.as_str()),
                ("timeout_secs", timeout.as_str()),
                ("title", notification.title.as_str()),
            ],
            writer,
        )?;
        Ok(())
    }
}

impl NotificationSink for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.write_to(notification, &mut io::stderr())
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl NotificationSink for NoopNotifier {
    fn name(&self) -> &'static str {
        "none"
    }

    fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Which sink the CLI builds from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Desktop,
    Log,
    None,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Desktop => "desktop",
            SinkKind::Log => "log",
            SinkKind::None => "none",
        }
    }

    pub fn build(&self) -> Box<dyn NotificationSink> {
        match self {
            SinkKind::Desktop => Box::new(DesktopNotifier::new()),
            SinkKind::Log => Box::new(LogNotifier),
            SinkKind::None => Box::new(NoopNotifier),
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(SinkKind::Desktop),
            "log" => Ok(SinkKind::Log),
            "none" => Ok(SinkKind::None),
            other => Err(format!(
                "unknown notification sink '{}', expected desktop, log or none",
                other
            )),
        }
    }
}
