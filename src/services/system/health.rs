use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::{AppStartTime, system::responses::HealthResponse};

/// 健康检查：数据库不可达时返回 503
pub async fn health(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let storage = service.get_storage(request);

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or(0);

    let (database, student_count) = match storage.ping().await {
        Ok(()) => match storage.count_students().await {
            Ok(count) => ("ok".to_string(), Some(count)),
            Err(e) => {
                warn!("Health check failed to count students: {}", e);
                ("ok".to_string(), None)
            }
        },
        Err(e) => {
            warn!("Health check database ping failed: {}", e);
            ("unavailable".to_string(), None)
        }
    };

    let healthy = database == "ok";
    let response = HealthResponse {
        system_name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        uptime_seconds,
        database,
        student_count,
    };

    if healthy {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(response))
    }
}
