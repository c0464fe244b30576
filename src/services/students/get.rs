use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{ErrorResponse, students::responses::StudentResultResponse};

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_student_by_id(student_id).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(StudentResultResponse::from(record))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::new("Student not found"))),
        Err(e) => {
            error!("Failed to get student {}: {}", student_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to get student")))
        }
    }
}
