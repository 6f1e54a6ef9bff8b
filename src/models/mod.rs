//! Data models shared by the evaluator, the health-log flow and the API.

pub mod health_log;
pub mod notification;
pub mod vital;

pub use health_log::{HealthLog, NewHealthLog};
pub use notification::{Notification, NotificationType, Severity, VitalDetails};
pub use vital::{Evaluation, StatusBand, VitalReading, VitalType, VitalValue};
