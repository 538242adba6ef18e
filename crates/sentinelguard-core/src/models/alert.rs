//! Alert data models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Alert severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Low severity
    Low,
    /// Medium severity
    Medium,
    /// High severity
    High,
}

impl Severity {
    /// Wire representation of the severity
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(Error::validation(format!("unknown severity: {other}"))),
        }
    }
}

/// A persisted security alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert category, e.g. "port-scan"
    #[serde(rename = "type")]
    pub alert_type: String,

    /// Human-readable description
    pub message: String,

    /// Severity level
    pub severity: Severity,

    /// Server-assigned acceptance time
    pub time: DateTime<Utc>,
}

impl Alert {
    /// Check the field invariants every persisted alert must hold
    pub fn validate(&self) -> Result<()> {
        check_text_fields(&self.alert_type, &self.message)
    }
}

/// Alert as submitted by a client, before it is stamped
///
/// Unknown fields are ignored, including any client-supplied `time`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertInput {
    /// Alert category
    #[serde(rename = "type")]
    pub alert_type: String,

    /// Human-readable description
    pub message: String,

    /// Severity level
    pub severity: Severity,
}

impl AlertInput {
    /// Parse and validate a raw JSON request body
    pub fn from_json(raw: &[u8]) -> Result<Self> {
        let input: Self =
            serde_json::from_slice(raw).map_err(|e| Error::validation(e.to_string()))?;
        input.validate()?;
        Ok(input)
    }

    /// Check field contents that the type system does not cover
    pub fn validate(&self) -> Result<()> {
        check_text_fields(&self.alert_type, &self.message)
    }

    /// Stamp the input with its acceptance time
    pub fn into_alert(self, time: DateTime<Utc>) -> Alert {
        Alert {
            alert_type: self.alert_type,
            message: self.message,
            severity: self.severity,
            time,
        }
    }
}

fn check_text_fields(alert_type: &str, message: &str) -> Result<()> {
    if alert_type.is_empty() {
        return Err(Error::validation("type must not be empty"));
    }
    if message.is_empty() {
        return Err(Error::validation("message must not be empty"));
    }
    Ok(())
}
