use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::subjects::requests::CreateSubjectRequest;
use crate::services::SubjectService;

// 懒加载的全局 SubjectService 实例
static SUBJECT_SERVICE: Lazy<SubjectService> = Lazy::new(SubjectService::new_lazy);

pub async fn list_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE.list_subjects(&req).await
}

pub async fn create_subject(
    req: HttpRequest,
    subject_data: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    SUBJECT_SERVICE
        .create_subject(subject_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_subject_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/subjects")
            .route("", web::get().to(list_subjects))
            .route("", web::post().to(create_subject)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{
        configure_student_routes,
        test_support::{json_config, memory_storage},
    };
    use actix_web::{App, http::StatusCode, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_subjects_created_lazily_and_sorted() {
        let app = test::init_service(
            App::new()
                .app_data(memory_storage().await)
                .app_data(json_config())
                .configure(configure_student_routes)
                .configure(configure_subject_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/subjects").to_request();
        let empty: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert!(empty.is_empty());

        let req = test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({
                "name": "Ada",
                "roll_number": "R-001",
                "marks": [
                    {"subject": "Physics", "marks_obtained": 70},
                    {"subject": " Biology ", "marks_obtained": 60}
                ]
            }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::OK
        );

        let req = test::TestRequest::get().uri("/api/subjects").to_request();
        let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names, vec!["Biology", "Physics"]);
    }

    #[actix_web::test]
    async fn test_create_subject() {
        let app = test::init_service(
            App::new()
                .app_data(memory_storage().await)
                .app_data(json_config())
                .configure(configure_subject_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/subjects")
            .set_json(json!({"name": "Math"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(res).await;
        assert_eq!(created["name"], "Math");

        let req = test::TestRequest::post()
            .uri("/api/subjects")
            .set_json(json!({"name": "Math"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let existing: Value = test::read_body_json(res).await;
        assert_eq!(existing["id"], created["id"]);

        let req = test::TestRequest::post()
            .uri("/api/subjects")
            .set_json(json!({"name": "   "}))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::BAD_REQUEST
        );
    }
}
