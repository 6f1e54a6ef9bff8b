use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vital::{StatusBand, VitalType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    VitalAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    /// `High` warns, `Critical` is critical, anything else raises nothing.
    pub fn from_band(band: StatusBand) -> Option<Self> {
        match band {
            StatusBand::Critical => Some(Severity::Critical),
            StatusBand::High => Some(Severity::Warning),
            StatusBand::Low | StatusBand::Normal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalDetails {
    #[serde(rename = "type")]
    pub vital_type: VitalType,
    pub value: String,
    pub normal_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub vital_details: VitalDetails,
    pub patient_id: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}
