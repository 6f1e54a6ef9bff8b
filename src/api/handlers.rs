use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::AppState;
use crate::error::Result;
use crate::models::{Evaluation, NewHealthLog, Notification, VitalType, VitalValue};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(rename = "type")]
    pub vital_type: String,
    #[serde(default)]
    pub value: Option<VitalValue>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub vital_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationList {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub async fn evaluate(state: web::Data<AppState>, body: web::Json<EvaluateRequest>) -> Result<web::Json<Evaluation>> {
    let request = body.into_inner();
    let vital_type: VitalType = request.vital_type.parse()?;
    let evaluation = state
        .evaluator
        .assess(vital_type, &request.value.unwrap_or_default())?;
    Ok(web::Json(evaluation))
}

pub async fn thresholds(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.evaluator.thresholds())
}

pub async fn submit_health_log(state: web::Data<AppState>, body: web::Json<NewHealthLog>) -> Result<HttpResponse> {
    let submission = state.health_logs.submit(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(submission))
}

pub async fn patient_health_logs(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let vital_type = query
        .vital_type
        .as_deref()
        .map(str::parse::<VitalType>)
        .transpose()?;
    let logs = state.health_logs.history(&path, vital_type).await?;
    Ok(HttpResponse::Ok().json(logs))
}

pub async fn delete_health_log(state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    state.health_logs.remove(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn patient_notifications(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let notifications = state.health_logs.notifications(&path).await?;
    let unread = state.health_logs.unread_notifications(&path).await?;
    Ok(HttpResponse::Ok().json(NotificationList { unread, notifications }))
}

pub async fn mark_notification_read(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse> {
    let (patient_id, notification_id) = path.into_inner();
    state
        .health_logs
        .mark_notification_read(&patient_id, notification_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
