//! API module for MediTrack
//!
//! JSON endpoints over the evaluator and the health-log flow.

pub mod handlers;
pub mod routes;

pub use routes::configure;

use crate::core::{HealthLogService, VitalStatusEvaluator};

/// Shared across actix workers through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: VitalStatusEvaluator,
    pub health_logs: HealthLogService,
}

impl AppState {
    pub fn new(health_logs: HealthLogService) -> Self {
        Self {
            evaluator: health_logs.evaluator().clone(),
            health_logs,
        }
    }
}
