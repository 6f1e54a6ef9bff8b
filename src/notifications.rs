//! Notification dispatch
//!
//! Delivery transport is not part of this crate. The dispatcher records
//! notifications per patient so they can be listed and acknowledged.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Notification;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification) -> Result<()>;

    /// Newest first.
    async fn for_patient(&self, patient_id: &str) -> Result<Vec<Notification>>;

    async fn mark_read(&self, patient_id: &str, notification_id: Uuid) -> Result<()>;

    async fn unread_count(&self, patient_id: &str) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct InMemoryDispatcher {
    by_patient: DashMap<String, Vec<Notification>>,
}

impl InMemoryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationDispatcher for InMemoryDispatcher {
    #[instrument(skip(self, notification), fields(patient_id = %notification.patient_id, severity = ?notification.severity))]
    async fn dispatch(&self, notification: Notification) -> Result<()> {
        info!(title = %notification.title, "vital alert recorded");
        self.by_patient
            .entry(notification.patient_id.clone())
            .or_default()
            .push(notification);
        Ok(())
    }

    async fn for_patient(&self, patient_id: &str) -> Result<Vec<Notification>> {
        let mut notifications = self
            .by_patient
            .get(patient_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(notifications)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, patient_id: &str, notification_id: Uuid) -> Result<()> {
        let mut entry = self
            .by_patient
            .get_mut(patient_id)
            .ok_or_else(|| AppError::not_found("notification", notification_id))?;
        let notification = entry
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| AppError::not_found("notification", notification_id))?;
        notification.read = true;
        Ok(())
    }

    async fn unread_count(&self, patient_id: &str) -> Result<usize> {
        Ok(self
            .by_patient
            .get(patient_id)
            .map(|entry| entry.iter().filter(|n| !n.read).count())
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alerts::vital_alert;
    use crate::core::thresholds::ThresholdTable;
    use crate::models::{StatusBand, VitalReading, VitalType};

    fn alert(patient_id: &str) -> Notification {
        let reading = VitalReading::new(patient_id, VitalType::HeartRate, 130.0);
        vital_alert(&reading, StatusBand::Critical.into(), &ThresholdTable::default()).unwrap()
    }

    #[actix_rt::test]
    async fn mark_read_clears_unread_count() {
        let dispatcher = InMemoryDispatcher::new();
        let first = alert("p-1");
        let id = first.id;
        dispatcher.dispatch(first).await.unwrap();
        dispatcher.dispatch(alert("p-1")).await.unwrap();
        assert_eq!(dispatcher.unread_count("p-1").await.unwrap(), 2);

        dispatcher.mark_read("p-1", id).await.unwrap();
        assert_eq!(dispatcher.unread_count("p-1").await.unwrap(), 1);
        assert_eq!(dispatcher.for_patient("p-1").await.unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn notifications_are_scoped_to_their_patient() {
        let dispatcher = InMemoryDispatcher::new();
        let other = alert("p-2");
        let other_id = other.id;
        dispatcher.dispatch(other).await.unwrap();

        assert!(dispatcher.for_patient("p-1").await.unwrap().is_empty());
        assert!(matches!(
            dispatcher.mark_read("p-1", other_id).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
