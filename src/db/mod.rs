//! Health-log persistence for MediTrack
//!
//! Storage itself lives outside this crate; `HealthLogStore` is the seam the
//! logging flow writes through. `InMemoryHealthLogStore` backs the binary and
//! the tests.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{HealthLog, VitalType};

#[async_trait]
pub trait HealthLogStore: Send + Sync {
    async fn insert(&self, log: HealthLog) -> Result<()>;

    async fn get(&self, id: Uuid) -> Result<Option<HealthLog>>;

    /// Newest `recorded_at` first, optionally restricted to one vital type.
    async fn list_for_patient(&self, patient_id: &str, vital_type: Option<VitalType>) -> Result<Vec<HealthLog>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryHealthLogStore {
    logs: DashMap<Uuid, HealthLog>,
}

impl InMemoryHealthLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

#[async_trait]
impl HealthLogStore for InMemoryHealthLogStore {
    #[instrument(skip(self, log), fields(patient_id = %log.patient_id, log_id = %log.id))]
    async fn insert(&self, log: HealthLog) -> Result<()> {
        self.logs.insert(log.id, log);
        debug!("health log stored");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<HealthLog>> {
        Ok(self.logs.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_for_patient(&self, patient_id: &str, vital_type: Option<VitalType>) -> Result<Vec<HealthLog>> {
        let mut logs: Vec<HealthLog> = self
            .logs
            .iter()
            .filter(|entry| entry.patient_id == patient_id)
            .filter(|entry| vital_type.map_or(true, |t| entry.vital_type == t))
            .map(|entry| entry.value().clone())
            .collect();
        logs.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(logs)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<()> {
        self.logs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("health log", id))
    }
}
