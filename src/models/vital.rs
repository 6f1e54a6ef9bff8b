use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Kind of vital sign a patient can log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    BloodPressure,
    HeartRate,
    BloodSugar,
    Temperature,
    Weight,
}

impl VitalType {
    pub const ALL: [VitalType; 5] = [
        VitalType::BloodPressure,
        VitalType::HeartRate,
        VitalType::BloodSugar,
        VitalType::Temperature,
        VitalType::Weight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "blood_pressure",
            VitalType::HeartRate => "heart_rate",
            VitalType::BloodSugar => "blood_sugar",
            VitalType::Temperature => "temperature",
            VitalType::Weight => "weight",
        }
    }

    /// Human-readable name used in alert titles and messages.
    pub fn display_name(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "blood pressure",
            VitalType::HeartRate => "heart rate",
            VitalType::BloodSugar => "blood sugar",
            VitalType::Temperature => "temperature",
            VitalType::Weight => "weight",
        }
    }

    /// Unit assumed when a log is submitted without one.
    pub fn default_unit(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "mmHg",
            VitalType::HeartRate => "bpm",
            VitalType::BloodSugar => "mg/dL",
            VitalType::Temperature => "°F",
            VitalType::Weight => "kg",
        }
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        VitalType::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| ValidationError::UnknownVitalType {
                name: name.to_string(),
            })
    }
}

/// Raw value as entered by the patient.
///
/// Blood pressure arrives as `"systolic/diastolic"`; every other vital is a
/// number, possibly sent as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalValue {
    Number(f64),
    Text(String),
}

impl VitalValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, VitalValue::Text(s) if s.trim().is_empty())
    }
}

impl Default for VitalValue {
    fn default() -> Self {
        VitalValue::Text(String::new())
    }
}

impl fmt::Display for VitalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalValue::Number(n) => write!(f, "{}", n),
            VitalValue::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<f64> for VitalValue {
    fn from(n: f64) -> Self {
        VitalValue::Number(n)
    }
}

impl From<&str> for VitalValue {
    fn from(s: &str) -> Self {
        VitalValue::Text(s.to_string())
    }
}

impl From<String> for VitalValue {
    fn from(s: String) -> Self {
        VitalValue::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalReading {
    #[serde(rename = "type")]
    pub vital_type: VitalType,
    pub value: VitalValue,
    pub recorded_at: DateTime<Utc>,
    pub patient_id: String,
}

impl VitalReading {
    pub fn new(patient_id: impl Into<String>, vital_type: VitalType, value: impl Into<VitalValue>) -> Self {
        Self {
            vital_type,
            value: value.into(),
            recorded_at: Utc::now(),
            patient_id: patient_id.into(),
        }
    }
}

/// Severity band of a reading. Ordered `Low < Normal < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBand {
    Low,
    Normal,
    High,
    Critical,
}

impl StatusBand {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusBand::Low => "low",
            StatusBand::Normal => "normal",
            StatusBand::High => "high",
            StatusBand::Critical => "critical",
        }
    }

    pub fn is_alertable(self) -> bool {
        matches!(self, StatusBand::High | StatusBand::Critical)
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome handed to the notification side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub status: StatusBand,
    pub alertable: bool,
}

impl From<StatusBand> for Evaluation {
    fn from(status: StatusBand) -> Self {
        Self {
            status,
            alertable: status.is_alertable(),
        }
    }
}
