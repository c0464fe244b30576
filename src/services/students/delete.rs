use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::{ErrorResponse, MessageResponse};

pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_student(student_id).await {
        Ok(true) => {
            info!("Student {} deleted", student_id);
            Ok(HttpResponse::Ok().json(MessageResponse::new("Student deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ErrorResponse::new("Student not found"))),
        Err(e) => {
            error!("Failed to delete student {}: {}", student_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to delete student")))
        }
    }
}
