//! Alert text and notification payloads

use serde::Serialize;

use crate::proximity::ProximityResult;

pub const ALERT_TITLE: &str = "Nuclear Radiation Proximity Alert!";
pub const DEFAULT_APP_NAME: &str = "Nuclear Power Plant Alert";
pub const DEFAULT_NOTIFICATION_TIMEOUT_SECS: u32 = 10;
pub const NAME_SEPARATOR: &str = ", ";
pub const SAFE_ZONE_MESSAGE: &str =
    "You are in a safe zone. No dangerous nuclear power plants nearby.";

/// Push-notification rendering of an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub app_name: String,
    pub timeout_secs: u32,
}

/// Produced only when at least one reactor is within threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    /// Names in proximity-engine order
    pub reactor_names: Vec<String>,
    /// In-page rendering
    pub message: String,
    pub notification: Notification,
}

fn warning_sentence(names: &str) -> String {
    format!(
        "You are near {} Nuclear Power Plant (Reactors).This area may be exposed to Nuclear Radiations. \
         Long exposure to these radiations may affect your health. \
         Please make sure that you move out from this area soon for your safety",
        names
    )
}

/// Builds alert payloads with a fixed notification framing.
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    app_name: String,
    timeout_secs: u32,
}

impl AlertFormatter {
    pub fn new(app_name: impl Into<String>, timeout_secs: u32) -> Self {
        Self {
            app_name: app_name.into(),
            timeout_secs,
        }
    }

    /// Returns `None` when no result is within threshold.
    pub fn format(&self, results: &[ProximityResult]) -> Option<AlertPayload> {
        let reactor_names: Vec<String> = results
            .iter()
            .filter(|r| r.within_threshold)
            .map(|r| r.reactor.name.clone())
            .collect();

        if reactor_names.is_empty() {
            return None;
        }

        let sentence = warning_sentence(&reactor_names.join(NAME_SEPARATOR));
        let notification = Notification {
            title: ALERT_TITLE.to_string(),
            message: format!("{}.", sentence),
            app_name: self.app_name.clone(),
            timeout_secs: self.timeout_secs,
        };

        Some(AlertPayload {
            reactor_names,
            message: sentence,
            notification,
        })
    }
}

impl Default for AlertFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME, DEFAULT_NOTIFICATION_TIMEOUT_SECS)
    }
}

/// Formats an alert with the default notification framing.
pub fn format_alert(results: &[ProximityResult]) -> Option<AlertPayload> {
    AlertFormatter::default().format(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ReactorRecord;

    fn result(name: &str, within: bool) -> ProximityResult {
        ProximityResult {
            reactor: ReactorRecord::new(name, 0.0, 0.0, Some(1.0)),
            distance_km: if within { 10.0 } else { 900.0 },
            within_threshold: within,
        }
    }

    #[test]
    fn test_nothing_nearby_is_none() {
        assert!(format_alert(&[]).is_none());
        assert!(format_alert(&[result("Kakrapar", false)]).is_none());
    }

    #[test]
    fn test_names_in_order() {
        let payload = format_alert(&[
            result("Tarapur", true),
            result("Rawatbhata", true),
            result("Kakrapar", false),
        ])
        .unwrap();

        assert_eq!(payload.reactor_names, vec!["Tarapur", "Rawatbhata"]);
        assert!(payload.message.starts_with("You are near Tarapur, Rawatbhata Nuclear Power Plant"));
        assert!(!payload.message.contains("Kakrapar"));
    }

    #[test]
    fn test_both_renderings_share_the_sentence() {
        let payload = format_alert(&[result("Tarapur", true)]).unwrap();
        assert_eq!(payload.notification.message, format!("{}.", payload.message));
        assert_eq!(payload.notification.title, ALERT_TITLE);
        assert_eq!(payload.notification.app_name, DEFAULT_APP_NAME);
        assert_eq!(payload.notification.timeout_secs, 10);
        assert!(payload.message.ends_with("for your safety"));
    }

    #[test]
    fn test_custom_framing() {
        let payload = AlertFormatter::new("Plant Watch", 30)
            .format(&[result("Tarapur", true)])
            .unwrap();
        assert_eq!(payload.notification.app_name, "Plant Watch");
        assert_eq!(payload.notification.timeout_secs, 30);
    }
}
