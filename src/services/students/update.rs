use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, normalize_marks};
use crate::models::{
    ErrorResponse,
    students::{requests::UpdateStudentRequest, responses::StudentResultResponse},
};
use crate::utils::validate::{validate_marks, validate_roll_number, validate_student_name};

/// 空白字符串视为未提供，保留原值
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = non_blank(update_data.name);
    let roll_number = non_blank(update_data.roll_number);

    if let Some(ref name) = name
        && let Err(msg) = validate_student_name(name)
    {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }

    if let Some(ref roll_number) = roll_number
        && let Err(msg) = validate_roll_number(roll_number)
    {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
    }

    let marks = match update_data.marks {
        Some(marks) => {
            if let Err(msg) = validate_marks(&marks) {
                return Ok(HttpResponse::BadRequest().json(ErrorResponse::new(msg)));
            }
            Some(normalize_marks(marks))
        }
        None => None,
    };

    let storage = service.get_storage(request);
    let requested_roll = roll_number.clone();
    let update = UpdateStudentRequest {
        name,
        roll_number,
        marks,
    };

    match storage.update_student(student_id, update).await {
        Ok(Some(record)) => {
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(StudentResultResponse::from(record)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::new("Student not found"))),
        Err(e) if e.is_conflict() => Ok(HttpResponse::Conflict().json(ErrorResponse::new(
            format!(
                "Roll number '{}' already exists",
                requested_roll.unwrap_or_default()
            ),
        ))),
        Err(e) => {
            error!("Failed to update student {}: {}", student_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to update student")))
        }
    }
}
