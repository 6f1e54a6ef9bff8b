//! Domain logic: thresholds, classification, alerting and the health-log flow.

pub mod alerts;
pub mod evaluator;
pub mod health_log;
pub mod thresholds;

pub use evaluator::{classify, is_alertable, VitalStatusEvaluator};
pub use health_log::{HealthLogService, Submission};
pub use thresholds::{BloodPressureRanges, Range, ThresholdTable};
