use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, normalize_marks};
use crate::models::{
    ErrorResponse,
    students::{requests::CreateStudentRequest, responses::StudentResultResponse},
};
use crate::utils::validate::{validate_marks, validate_roll_number, validate_student_name};

pub async fn create_student(
    service: &StudentService,
    mut student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    student_data.name = student_data.name.trim().to_string();
    student_data.roll_number = student_data.roll_number.trim().to_string();

    if student_data.name.is_empty() || student_data.roll_number.is_empty() {
        return Ok(HttpResponse::BadRequest()
            .json(ErrorResponse::new("Name and roll_number are required")));
    }

    if let Err(msg) = validate_student_name(&student_data.name) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }

    if let Err(msg) = validate_roll_number(&student_data.roll_number) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }

    if let Err(msg) = validate_marks(&student_data.marks) {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }
    student_data.marks = normalize_marks(student_data.marks);

    let storage = service.get_storage(request);
    let roll_number = student_data.roll_number.clone();

    match storage.create_student(student_data).await {
        Ok(record) => {
            info!(
                "Student {} created with roll number {}",
                record.student.id, record.student.roll_number
            );
            Ok(HttpResponse::Ok().json(StudentResultResponse::from(record)))
        }
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ErrorResponse::new(
            format!("Roll number '{roll_number}' already exists"),
        ))),
        Err(e) => {
            error!("Failed to create student: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to create student")))
        }
    }
}
