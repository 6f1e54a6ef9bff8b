//! Band boundaries per vital type.
//!
//! The table is built once (defaults, then any overrides from configuration)
//! and shared read-only behind an `Arc` for the life of the process.

use serde::{Deserialize, Serialize};

use crate::error::ThresholdError;
use crate::models::VitalType;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub normal: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, normal: f64, high: f64) -> Self {
        Self { low, normal, high }
    }

    /// `"low-high"`, as shown to patients next to an alert.
    pub fn render(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }

    fn check(&self, name: &'static str) -> Result<(), ThresholdError> {
        let finite = self.low.is_finite() && self.normal.is_finite() && self.high.is_finite();
        if !finite || self.low > self.normal || self.normal > self.high {
            return Err(ThresholdError::OutOfOrder {
                name,
                low: self.low,
                normal: self.normal,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Either side may be overridden alone; the other keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodPressureRanges {
    pub systolic: Range,
    pub diastolic: Range,
}

impl Default for BloodPressureRanges {
    fn default() -> Self {
        Self {
            systolic: Range::new(90.0, 120.0, 140.0),
            diastolic: Range::new(60.0, 80.0, 90.0),
        }
    }
}

/// Missing sections in an override fall back to the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub blood_pressure: BloodPressureRanges,
    pub heart_rate: Range,
    pub blood_sugar: Range,
    pub temperature: Range,
    pub weight: Range,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            blood_pressure: BloodPressureRanges::default(),
            heart_rate: Range::new(60.0, 80.0, 100.0),
            blood_sugar: Range::new(70.0, 100.0, 140.0),
            temperature: Range::new(97.0, 98.6, 99.5),
            weight: Range::new(50.0, 70.0, 100.0),
        }
    }
}

impl ThresholdTable {
    /// Range the evaluator compares against. Blood pressure uses systolic.
    pub fn range(&self, vital_type: VitalType) -> &Range {
        match vital_type {
            VitalType::BloodPressure => &self.blood_pressure.systolic,
            VitalType::HeartRate => &self.heart_rate,
            VitalType::BloodSugar => &self.blood_sugar,
            VitalType::Temperature => &self.temperature,
            VitalType::Weight => &self.weight,
        }
    }

    pub fn normal_range(&self, vital_type: VitalType) -> String {
        match vital_type {
            VitalType::BloodPressure => format!(
                "{}/{}",
                self.blood_pressure.systolic.render(),
                self.blood_pressure.diastolic.render()
            ),
            other => self.range(other).render(),
        }
    }

    /// Rejects tables whose boundaries are out of order or not finite.
    pub fn check(&self) -> Result<(), ThresholdError> {
        self.blood_pressure.systolic.check("blood_pressure.systolic")?;
        self.blood_pressure.diastolic.check("blood_pressure.diastolic")?;
        self.heart_rate.check("heart_rate")?;
        self.blood_sugar.check("blood_sugar")?;
        self.temperature.check("temperature")?;
        self.weight.check("weight")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_well_formed() {
        assert_eq!(ThresholdTable::default().check(), Ok(()));
    }

    #[test]
    fn normal_range_strings() {
        let table = ThresholdTable::default();
        assert_eq!(table.normal_range(VitalType::HeartRate), "60-100");
        assert_eq!(table.normal_range(VitalType::Temperature), "97-99.5");
        assert_eq!(table.normal_range(VitalType::BloodPressure), "90-140/60-90");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let table: ThresholdTable =
            serde_json::from_str(r#"{"heart_rate":{"low":50,"normal":70,"high":110}}"#).unwrap();
        assert_eq!(table.heart_rate, Range::new(50.0, 70.0, 110.0));
        assert_eq!(table.blood_sugar, ThresholdTable::default().blood_sugar);
    }

    #[test]
    fn out_of_order_ranges_are_rejected() {
        let mut table = ThresholdTable::default();
        table.weight = Range::new(100.0, 70.0, 50.0);
        assert_eq!(
            table.check(),
            Err(ThresholdError::OutOfOrder {
                name: "weight",
                low: 100.0,
                normal: 70.0,
                high: 50.0,
            })
        );
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let mut table = ThresholdTable::default();
        table.blood_pressure.diastolic.high = f64::INFINITY;
        assert!(matches!(
            table.check(),
            Err(ThresholdError::OutOfOrder {
                name: "blood_pressure.diastolic",
                ..
            })
        ));
    }

    #[test]
    fn systolic_only_override_keeps_default_diastolic() {
        let table: ThresholdTable = serde_json::from_str(
            r#"{"blood_pressure":{"systolic":{"low":85,"normal":115,"high":135}}}"#,
        )
        .unwrap();
        assert_eq!(table.blood_pressure.systolic, Range::new(85.0, 115.0, 135.0));
        assert_eq!(
            table.blood_pressure.diastolic,
            BloodPressureRanges::default().diastolic
        );
        assert_eq!(table.normal_range(VitalType::BloodPressure), "85-135/60-90");
        assert_eq!(table.check(), Ok(()));
    }
}
