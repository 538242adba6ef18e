//! Selection over a stored alert collection

use super::alert::{Alert, Severity};

/// Filter applied when listing stored alerts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertQuery {
    /// Keep only alerts of this severity
    pub severity: Option<Severity>,
    /// Keep only the most recent N matching alerts
    pub limit: Option<usize>,
}

impl AlertQuery {
    /// Apply the filter, preserving acceptance order
    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        let mut selected: Vec<Alert> = alerts
            .into_iter()
            .filter(|a| self.severity.map_or(true, |s| a.severity == s))
            .collect();

        if let Some(limit) = self.limit {
            let skip = selected.len().saturating_sub(limit);
            selected.drain(..skip);
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn alerts() -> Vec<Alert> {
        [
            ("a", Severity::High),
            ("b", Severity::Low),
            ("c", Severity::High),
            ("d", Severity::Medium),
            ("e", Severity::High),
        ]
        .into_iter()
        .map(|(alert_type, severity)| Alert {
            alert_type: alert_type.to_string(),
            message: "m".to_string(),
            severity,
            time: Utc::now(),
        })
        .collect()
    }

    fn types(alerts: &[Alert]) -> Vec<&str> {
        alerts.iter().map(|a| a.alert_type.as_str()).collect()
    }

    #[test]
    fn test_default_query_keeps_everything() {
        let selected = AlertQuery::default().apply(alerts());
        assert_eq!(types(&selected), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_filter_by_severity() {
        let query = AlertQuery {
            severity: Some(Severity::High),
            limit: None,
        };
        assert_eq!(types(&query.apply(alerts())), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_limit_keeps_most_recent() {
        let query = AlertQuery {
            severity: None,
            limit: Some(2),
        };
        assert_eq!(types(&query.apply(alerts())), vec!["d", "e"]);
    }

    #[test]
    fn test_limit_applies_after_severity_filter() {
        let query = AlertQuery {
            severity: Some(Severity::High),
            limit: Some(2),
        };
        assert_eq!(types(&query.apply(alerts())), vec!["c", "e"]);
    }

    #[test]
    fn test_limit_larger_than_collection() {
        let query = AlertQuery {
            severity: Some(Severity::Low),
            limit: Some(10),
        };
        assert_eq!(types(&query.apply(alerts())), vec!["b"]);

        let query = AlertQuery {
            severity: None,
            limit: Some(0),
        };
        assert!(query.apply(alerts()).is_empty());
    }
}
