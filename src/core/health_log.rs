//! The patient health-log flow: validate, classify, store, alert.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use super::alerts;
use super::evaluator::VitalStatusEvaluator;
use crate::db::HealthLogStore;
use crate::error::{Result, ValidationError};
use crate::models::{Evaluation, HealthLog, NewHealthLog, Notification, VitalReading, VitalType};
use crate::notifications::NotificationDispatcher;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub log: HealthLog,
    pub evaluation: Evaluation,
    pub alert_dispatched: bool,
}

#[derive(Clone)]
pub struct HealthLogService {
    evaluator: VitalStatusEvaluator,
    store: Arc<dyn HealthLogStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl HealthLogService {
    pub fn new(
        evaluator: VitalStatusEvaluator,
        store: Arc<dyn HealthLogStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            evaluator,
            store,
            dispatcher,
        }
    }

    pub fn evaluator(&self) -> &VitalStatusEvaluator {
        &self.evaluator
    }

    /// Rejected input is returned to the caller and nothing is stored. A
    /// failed alert dispatch does not undo the stored log.
    #[instrument(skip(self, request), fields(patient_id = %request.patient_id, vital_type = %request.vital_type))]
    pub async fn submit(&self, request: NewHealthLog) -> Result<Submission> {
        request.validate().map_err(ValidationError::from)?;
        let vital_type: VitalType = request.vital_type.parse()?;

        let reading = VitalReading {
            vital_type,
            value: request.value.unwrap_or_default(),
            recorded_at: request.recorded_at.unwrap_or_else(Utc::now),
            patient_id: request.patient_id,
        };

        let evaluation = self.evaluator.evaluate(&reading).map_err(|e| {
            warn!(error = %e, "health log rejected");
            e
        })?;

        let log = HealthLog {
            id: Uuid::new_v4(),
            patient_id: reading.patient_id.clone(),
            vital_type,
            value: reading.value.clone(),
            unit: request
                .unit
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| vital_type.default_unit().to_string()),
            notes: request.notes,
            recorded_at: reading.recorded_at,
            status: evaluation.status,
            created_at: Utc::now(),
        };
        self.store.insert(log.clone()).await?;

        let alert_dispatched = match alerts::vital_alert(&reading, evaluation, self.evaluator.thresholds()) {
            Some(notification) => match self.dispatcher.dispatch(notification).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, log_id = %log.id, "failed to dispatch vital alert");
                    false
                }
            },
            None => false,
        };

        info!(
            log_id = %log.id,
            status = %evaluation.status,
            alert_dispatched,
            "health log recorded"
        );

        Ok(Submission {
            log,
            evaluation,
            alert_dispatched,
        })
    }

    #[instrument(skip(self))]
    pub async fn history(&self, patient_id: &str, vital_type: Option<VitalType>) -> Result<Vec<HealthLog>> {
        self.store.list_for_patient(patient_id, vital_type).await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, log_id: Uuid) -> Result<()> {
        self.store.delete(log_id).await?;
        info!("health log removed");
        Ok(())
    }

    pub async fn notifications(&self, patient_id: &str) -> Result<Vec<Notification>> {
        self.dispatcher.for_patient(patient_id).await
    }

    pub async fn mark_notification_read(&self, patient_id: &str, notification_id: Uuid) -> Result<()> {
        self.dispatcher.mark_read(patient_id, notification_id).await
    }

    pub async fn unread_notifications(&self, patient_id: &str) -> Result<usize> {
        self.dispatcher.unread_count(patient_id).await
    }
}
