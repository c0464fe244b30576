use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubjectService;
use crate::models::{ErrorResponse, subjects::requests::CreateSubjectRequest};
use crate::utils::validate::validate_subject_name;

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_subject_name(&subject_data.name) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }
    let name = subject_data.name.trim();

    let storage = service.get_storage(request);

    match storage.create_subject(name).await {
        Ok((subject, true)) => {
            info!("Subject '{}' created", subject.name);
            Ok(HttpResponse::Created().json(subject))
        }
        Ok((subject, false)) => Ok(HttpResponse::Ok().json(subject)),
        Err(e) => {
            error!("Failed to create subject '{}': {}", name, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to create subject")))
        }
    }
}
