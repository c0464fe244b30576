use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubjectService;
use crate::models::ErrorResponse;

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subjects().await {
        Ok(subjects) => {
            let names: Vec<String> = subjects.into_iter().map(|s| s.name).collect();
            Ok(HttpResponse::Ok().json(names))
        }
        Err(e) => {
            error!("Failed to list subjects: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to get subjects")))
        }
    }
}
