use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::vital::{StatusBand, VitalType, VitalValue};

/// Request payload for logging a new vital sign.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthLog {
    #[validate(length(min = 1, message = "patientId is required"))]
    pub patient_id: String,

    #[serde(rename = "type")]
    pub vital_type: String,

    #[serde(default)]
    pub value: Option<VitalValue>,

    #[validate(length(max = 32, message = "unit cannot exceed 32 characters"))]
    pub unit: Option<String>,

    #[validate(length(max = 1000, message = "notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    /// Defaults to the submission time when absent.
    pub recorded_at: Option<DateTime<Utc>>,
}

/// A stored health log together with the band it was evaluated to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthLog {
    pub id: Uuid,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub unit: String,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub status: StatusBand,
    pub created_at: DateTime<Utc>,
}
