//! 请求参数解析失败时的统一响应
//!
//! 默认的 actix 错误响应是纯文本，这里统一改为 `{"error": "..."}`。

use actix_web::{
    Error, HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    web,
};
use tracing::debug;

use crate::models::ErrorResponse;

/// JSON 提取器配置：请求体上限与统一错误格式
///
/// `web::Json` 只认 `JsonConfig` 的上限，`PayloadConfig` 对它不生效。
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

/// JSON 请求体解析错误
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid JSON payload for {}: {}", req.path(), err);

    let response = match &err {
        JsonPayloadError::ContentType => HttpResponse::UnsupportedMediaType()
            .json(ErrorResponse::new("Content-Type must be application/json")),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            HttpResponse::PayloadTooLarge().json(ErrorResponse::new("Request body too large"))
        }
        _ => HttpResponse::BadRequest()
            .json(ErrorResponse::new(format!("Invalid request body: {err}"))),
    };

    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Invalid query string for {}: {}", req.path(), err);

    let response = HttpResponse::BadRequest()
        .json(ErrorResponse::new(format!("Invalid query parameters: {err}")));

    InternalError::from_response(err, response).into()
}

/// 路径参数错误
pub fn path_error_response(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message))
}
