use actix_web::web;

use super::handlers;
use crate::error::{AppError, ValidationError};

pub fn configure(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(ValidationError::InvalidField(err.to_string())).into()
    });

    cfg.app_data(json)
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/vitals")
                        .route("/evaluate", web::post().to(handlers::evaluate))
                        .route("/thresholds", web::get().to(handlers::thresholds)),
                )
                .service(
                    web::scope("/health-logs")
                        .route("", web::post().to(handlers::submit_health_log))
                        .route("/patient/{patient_id}", web::get().to(handlers::patient_health_logs))
                        .route("/{log_id}", web::delete().to(handlers::delete_health_log)),
                )
                .service(
                    web::scope("/notifications")
                        .route("/{patient_id}", web::get().to(handlers::patient_notifications))
                        .route(
                            "/{patient_id}/{notification_id}/read",
                            web::put().to(handlers::mark_notification_read),
                        ),
                ),
        );
}
