//! Error types for MediTrack
//!
//! `ValidationError` is the rejected-input signal produced by the evaluator and
//! the health-log flow. `AppError` is what service operations, configuration
//! loading and HTTP handlers return; it maps onto HTTP status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::models::VitalType;

/// A reading or request that cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a value is required for {vital_type}")]
    MissingValue { vital_type: VitalType },

    #[error("{vital_type} value '{value}' is not a number")]
    NotNumeric { vital_type: VitalType, value: String },

    #[error("blood pressure value '{value}' must be formatted as systolic/diastolic")]
    MalformedBloodPressure { value: String },

    #[error("unknown vital type '{name}'")]
    UnknownVitalType { name: String },

    #[error("invalid request: {0}")]
    InvalidField(String),
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ValidationError::InvalidField(errors.to_string())
    }
}

/// A threshold table that cannot be used for classification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name} thresholds must satisfy low <= normal <= high (got {low}/{normal}/{high})")]
    OutOfOrder {
        name: &'static str,
        low: f64,
        normal: f64,
        high: f64,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("notification dispatch failed: {0}")]
    Dispatch(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Dispatch(_) | AppError::Config(_) | AppError::Thresholds(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
