//! Vital-sign status classification.
//!
//! `classify` is a pure function of the vital type, the raw value and the
//! threshold table. Boundaries are exclusive: a value equal to `low` or `high`
//! is `Normal`.

use std::sync::Arc;

use tracing::debug;

use super::thresholds::{Range, ThresholdTable};
use crate::error::ValidationError;
use crate::models::{Evaluation, StatusBand, VitalReading, VitalType, VitalValue};

/// Amount above `high` at which blood pressure and heart rate turn critical.
pub const CARDIO_CRITICAL_MARGIN: f64 = 20.0;
/// Amount above `high` at which blood sugar turns critical.
pub const BLOOD_SUGAR_CRITICAL_MARGIN: f64 = 50.0;

pub fn classify(
    vital_type: VitalType,
    value: &VitalValue,
    table: &ThresholdTable,
) -> Result<StatusBand, ValidationError> {
    if value.is_missing() {
        return Err(ValidationError::MissingValue { vital_type });
    }

    let band = match vital_type {
        VitalType::BloodPressure => {
            // Diastolic is validated but does not take part in the band.
            let (systolic, _diastolic) = parse_blood_pressure(value)?;
            escalating_band(systolic, table.range(vital_type), CARDIO_CRITICAL_MARGIN)
        }
        VitalType::HeartRate => escalating_band(
            parse_numeric(vital_type, value)?,
            table.range(vital_type),
            CARDIO_CRITICAL_MARGIN,
        ),
        VitalType::BloodSugar => escalating_band(
            parse_numeric(vital_type, value)?,
            table.range(vital_type),
            BLOOD_SUGAR_CRITICAL_MARGIN,
        ),
        VitalType::Temperature | VitalType::Weight => {
            basic_band(parse_numeric(vital_type, value)?, table.range(vital_type))
        }
    };

    Ok(band)
}

pub fn is_alertable(band: StatusBand) -> bool {
    band.is_alertable()
}

fn basic_band(value: f64, range: &Range) -> StatusBand {
    if value < range.low {
        StatusBand::Low
    } else if value > range.high {
        StatusBand::High
    } else {
        StatusBand::Normal
    }
}

fn escalating_band(value: f64, range: &Range, critical_margin: f64) -> StatusBand {
    if value > range.high + critical_margin {
        StatusBand::Critical
    } else {
        basic_band(value, range)
    }
}

fn parse_numeric(vital_type: VitalType, value: &VitalValue) -> Result<f64, ValidationError> {
    let parsed = match value {
        VitalValue::Number(n) => Some(*n),
        VitalValue::Text(s) => s.trim().parse::<f64>().ok(),
    };

    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| ValidationError::NotNumeric {
            vital_type,
            value: value.to_string(),
        })
}

/// Splits `"systolic/diastolic"` into its two readings.
pub fn parse_blood_pressure(value: &VitalValue) -> Result<(f64, f64), ValidationError> {
    let malformed = || ValidationError::MalformedBloodPressure {
        value: value.to_string(),
    };

    let VitalValue::Text(text) = value else {
        return Err(malformed());
    };
    let (systolic, diastolic) = text.trim().split_once('/').ok_or_else(malformed)?;

    let part = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(malformed)
    };

    Ok((part(systolic)?, part(diastolic)?))
}

/// Classifier bound to an injected threshold table.
#[derive(Debug, Clone)]
pub struct VitalStatusEvaluator {
    thresholds: Arc<ThresholdTable>,
    missing_as_normal: bool,
}

impl Default for VitalStatusEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(ThresholdTable::default()))
    }
}

impl VitalStatusEvaluator {
    pub fn new(thresholds: Arc<ThresholdTable>) -> Self {
        Self {
            thresholds,
            missing_as_normal: false,
        }
    }

    /// When enabled, an empty value classifies as `Normal` instead of being
    /// rejected. Malformed values are rejected either way.
    pub fn with_missing_as_normal(mut self, enabled: bool) -> Self {
        self.missing_as_normal = enabled;
        self
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn classify(&self, vital_type: VitalType, value: &VitalValue) -> Result<StatusBand, ValidationError> {
        match classify(vital_type, value, &self.thresholds) {
            Err(ValidationError::MissingValue { .. }) if self.missing_as_normal => {
                debug!(vital_type = %vital_type, "missing value treated as normal");
                Ok(StatusBand::Normal)
            }
            other => other,
        }
    }

    pub fn assess(&self, vital_type: VitalType, value: &VitalValue) -> Result<Evaluation, ValidationError> {
        self.classify(vital_type, value).map(Evaluation::from)
    }

    pub fn evaluate(&self, reading: &VitalReading) -> Result<Evaluation, ValidationError> {
        self.assess(reading.vital_type, &reading.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn table() -> ThresholdTable {
        ThresholdTable::default()
    }

    #[test_case(59.0 => StatusBand::Low ; "below low")]
    #[test_case(60.0 => StatusBand::Normal ; "at low")]
    #[test_case(75.0 => StatusBand::Normal ; "mid range")]
    #[test_case(100.0 => StatusBand::Normal ; "at high")]
    #[test_case(105.0 => StatusBand::High ; "above high")]
    #[test_case(120.0 => StatusBand::High ; "at critical margin")]
    #[test_case(125.0 => StatusBand::Critical ; "past critical margin")]
    fn heart_rate(value: f64) -> StatusBand {
        classify(VitalType::HeartRate, &value.into(), &table()).unwrap()
    }

    #[test_case(69.0 => StatusBand::Low)]
    #[test_case(140.0 => StatusBand::Normal)]
    #[test_case(185.0 => StatusBand::High)]
    #[test_case(190.0 => StatusBand::High)]
    #[test_case(191.0 => StatusBand::Critical)]
    fn blood_sugar(value: f64) -> StatusBand {
        classify(VitalType::BloodSugar, &value.into(), &table()).unwrap()
    }

    #[test_case("85/60" => StatusBand::Low)]
    #[test_case("120/80" => StatusBand::Normal)]
    #[test_case("145/95" => StatusBand::High)]
    #[test_case("160/100" => StatusBand::High)]
    #[test_case("165/70" => StatusBand::Critical)]
    fn blood_pressure(value: &str) -> StatusBand {
        classify(VitalType::BloodPressure, &value.into(), &table()).unwrap()
    }

    #[test_case(VitalType::Temperature, 96.5 => StatusBand::Low)]
    #[test_case(VitalType::Temperature, 99.5 => StatusBand::Normal)]
    #[test_case(VitalType::Temperature, 104.0 => StatusBand::High ; "fever never escalates")]
    #[test_case(VitalType::Weight, 50.0 => StatusBand::Normal)]
    #[test_case(VitalType::Weight, 180.0 => StatusBand::High ; "weight never escalates")]
    fn low_high_only(vital_type: VitalType, value: f64) -> StatusBand {
        classify(vital_type, &value.into(), &table()).unwrap()
    }

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(
            classify(VitalType::HeartRate, &" 105 ".into(), &table()),
            Ok(StatusBand::High)
        );
    }

    #[test_case(VitalType::HeartRate, "abc")]
    #[test_case(VitalType::HeartRate, "NaN")]
    #[test_case(VitalType::Weight, "70kg")]
    fn non_numeric_values_are_rejected(vital_type: VitalType, value: &str) {
        assert!(matches!(
            classify(vital_type, &value.into(), &table()),
            Err(ValidationError::NotNumeric { .. })
        ));
    }

    #[test_case(VitalType::BloodPressure, VitalValue::from("120") ; "no separator")]
    #[test_case(VitalType::BloodPressure, VitalValue::from("120/") ; "no diastolic")]
    #[test_case(VitalType::BloodPressure, VitalValue::from("a/b") ; "letters")]
    #[test_case(VitalType::BloodPressure, VitalValue::from(120.0) ; "bare number")]
    fn malformed_blood_pressure_is_rejected(vital_type: VitalType, value: VitalValue) {
        assert!(matches!(
            classify(vital_type, &value, &table()),
            Err(ValidationError::MalformedBloodPressure { .. })
        ));
    }

    #[test]
    fn missing_value_is_rejected_unless_configured() {
        let strict = VitalStatusEvaluator::default();
        assert_eq!(
            strict.classify(VitalType::Weight, &VitalValue::default()),
            Err(ValidationError::MissingValue {
                vital_type: VitalType::Weight
            })
        );

        let lenient = VitalStatusEvaluator::default().with_missing_as_normal(true);
        assert_eq!(
            lenient.classify(VitalType::Weight, &"".into()),
            Ok(StatusBand::Normal)
        );
        assert!(lenient.classify(VitalType::Weight, &"heavy".into()).is_err());
    }

    #[test]
    fn alertable_bands() {
        assert!(!is_alertable(StatusBand::Low));
        assert!(!is_alertable(StatusBand::Normal));
        assert!(is_alertable(StatusBand::High));
        assert!(is_alertable(StatusBand::Critical));
    }

    #[test]
    fn injected_table_overrides_defaults() {
        let mut custom = ThresholdTable::default();
        custom.heart_rate = Range::new(40.0, 60.0, 80.0);
        let evaluator = VitalStatusEvaluator::new(Arc::new(custom));

        let eval = evaluator.assess(VitalType::HeartRate, &90.0.into()).unwrap();
        assert_eq!(eval.status, StatusBand::High);
        assert!(eval.alertable);
    }
}
