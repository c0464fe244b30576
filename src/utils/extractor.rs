//! 安全的路径参数提取器
//!
//! 路径中的 `{id}` 必须是正整数，否则直接返回 400。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::utils::path_error_response;

/// 解析路径参数 `{id}` 为正的 i64
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

pub(crate) fn parse_positive_id(raw: &str) -> Result<i64, String> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(_) => Err(format!("Invalid id '{raw}': must be a positive integer")),
        Err(_) => Err(format!("Invalid id '{raw}': not an integer")),
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id").unwrap_or_default();

        ready(match parse_positive_id(raw) {
            Ok(id) => Ok(SafeIDI64(id)),
            Err(msg) => {
                Err(InternalError::from_response(msg.clone(), path_error_response(msg)).into())
            }
        })
    }
}
