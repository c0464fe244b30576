use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StudentService;
use crate::models::{
    ErrorResponse,
    students::{
        requests::{StudentListParams, StudentListQuery},
        responses::StudentResultResponse,
    },
};

pub async fn list_students(
    service: &StudentService,
    query: StudentListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = StudentListQuery {
        search: query.search,
    };

    match storage.list_students(list_query).await {
        Ok(records) => {
            let results: Vec<StudentResultResponse> =
                records.into_iter().map(StudentResultResponse::from).collect();
            Ok(HttpResponse::Ok().json(results))
        }
        Err(e) => {
            error!("Failed to list students: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to get students")))
        }
    }
}
