//! Proximity alerts
//!
//! Turns within-threshold results into a warning sentence rendered twice:
//! once for the report and once as a notification. Notification delivery
//! goes through an injected `NotificationSink`.

mod formatter;
mod notifier;

pub use formatter::{
    format_alert, AlertFormatter, AlertPayload, Notification, ALERT_TITLE, DEFAULT_APP_NAME,
    DEFAULT_NOTIFICATION_TIMEOUT_SECS, NAME_SEPARATOR, SAFE_ZONE_MESSAGE,
};
pub use notifier::{
    deliver, DesktopNotifier, LogNotifier, NoopNotifier, NotificationSink, NotifyError, SinkKind,
};
