/*!
 * 请求追踪中间件
 *
 * 为每个请求分配 `X-Request-Id`，并在请求结束后记录方法、路径、状态码与耗时。
 * 客户端已携带合法的 `X-Request-Id` 时沿用该值。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::App;
 * use crate::middlewares::RequestTrace;
 *
 * App::new().wrap(RequestTrace)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{info, warn};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 64;

/// 当前请求的追踪 ID，可通过 `req.extensions()` 读取
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Clone, Default)]
pub struct RequestTrace;

/// 沿用客户端提供的 ID（仅允许可见 ASCII），否则生成 UUID v4
fn resolve_request_id(req: &ServiceRequest) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| {
            !v.is_empty()
                && v.len() <= MAX_REQUEST_ID_LEN
                && v.chars().all(|c| c.is_ascii_graphic())
        })
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let started = Instant::now();
            let request_id = resolve_request_id(&req);
            let method = req.method().to_string();
            let path = req.path().to_string();

            req.extensions_mut().insert(RequestId(request_id.clone()));

            let mut res = srv.call(req).await?;

            let status = res.status();
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

            if let Ok(value) = HeaderValue::from_str(&request_id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            if status.is_server_error() {
                warn!(
                    request_id = %request_id,
                    "{} {} -> {} ({:.2} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            } else {
                info!(
                    request_id = %request_id,
                    "{} {} -> {} ({:.2} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            }

            Ok(res)
        })
    }
}
