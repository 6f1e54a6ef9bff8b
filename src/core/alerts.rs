//! Turns an alertable evaluation into a `vital_alert` notification.

use chrono::Utc;
use uuid::Uuid;

use super::thresholds::ThresholdTable;
use crate::models::{
    Evaluation, Notification, NotificationType, Severity, VitalDetails, VitalReading,
};

/// Returns `None` for readings that do not warrant an alert.
pub fn vital_alert(
    reading: &VitalReading,
    evaluation: Evaluation,
    thresholds: &ThresholdTable,
) -> Option<Notification> {
    if !evaluation.alertable {
        return None;
    }
    let severity = Severity::from_band(evaluation.status)?;

    let vital = reading.vital_type.display_name();
    let label = match severity {
        Severity::Critical => "Critical",
        Severity::Warning => "High",
    };
    let value = reading.value.to_string();
    let normal_range = thresholds.normal_range(reading.vital_type);

    Some(Notification {
        id: Uuid::new_v4(),
        kind: NotificationType::VitalAlert,
        severity,
        title: format!("{} {} reading", label, vital),
        message: format!(
            "Your {} reading of {} {} is {} (normal range {}).",
            vital,
            value,
            reading.vital_type.default_unit(),
            evaluation.status,
            normal_range
        ),
        vital_details: VitalDetails {
            vital_type: reading.vital_type,
            value,
            normal_range,
        },
        patient_id: reading.patient_id.clone(),
        timestamp: Utc::now(),
        read: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatusBand, VitalType};

    #[test]
    fn critical_heart_rate_raises_critical_alert() {
        let reading = VitalReading::new("p-7", VitalType::HeartRate, 125.0);
        let alert = vital_alert(&reading, StatusBand::Critical.into(), &ThresholdTable::default())
            .expect("critical readings alert");

        assert_eq!(alert.kind, NotificationType::VitalAlert);
        assert_eq!(alert.severity, Severity::Critical);
        assert_eq!(alert.title, "Critical heart rate reading");
        assert_eq!(alert.patient_id, "p-7");
        assert_eq!(alert.vital_details.value, "125");
        assert_eq!(alert.vital_details.normal_range, "60-100");
        assert!(!alert.read);
    }

    #[test]
    fn high_blood_pressure_is_a_warning() {
        let reading = VitalReading::new("p-7", VitalType::BloodPressure, "145/95");
        let alert = vital_alert(&reading, StatusBand::High.into(), &ThresholdTable::default()).unwrap();

        assert_eq!(alert.severity, Severity::Warning);
        assert_eq!(alert.vital_details.value, "145/95");
        assert_eq!(
            alert.message,
            "Your blood pressure reading of 145/95 mmHg is high (normal range 90-140/60-90)."
        );
    }

    #[test]
    fn low_and_normal_readings_do_not_alert() {
        let reading = VitalReading::new("p-7", VitalType::HeartRate, 50.0);
        let table = ThresholdTable::default();
        assert!(vital_alert(&reading, StatusBand::Low.into(), &table).is_none());
        assert!(vital_alert(&reading, StatusBand::Normal.into(), &table).is_none());
    }

    #[test]
    fn wire_format_matches_notification_record() {
        let reading = VitalReading::new("p-1", VitalType::BloodSugar, 200.0);
        let alert = vital_alert(&reading, StatusBand::Critical.into(), &ThresholdTable::default()).unwrap();
        let json = serde_json::to_value(&alert).unwrap();

        assert_eq!(json["type"], "vital_alert");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["patientId"], "p-1");
        assert_eq!(json["vitalDetails"]["type"], "blood_sugar");
        assert_eq!(json["vitalDetails"]["normalRange"], "70-140");
    }
}
