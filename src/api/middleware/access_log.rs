//! HTTP access log middleware
//!
//! 记录方法、路径、状态码和耗时。健康检查只打 debug，其余请求按状态码分级。

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Access log middleware factory
#[derive(Clone, Default)]
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogService {
            service: Rc::new(service),
        }))
    }
}

pub struct AccessLogService<S> {
    service: Rc<S>,
}

/// 按路径归类，避免把短码本身写进分类字段
fn classify_endpoint(path: &str) -> &'static str {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    match first {
        "" => "root",
        "health" => "health",
        "auth" => "auth",
        "shorten" | "info" | "my-urls" => "urls",
        "bookmarks" => "bookmarks",
        _ => "redirect",
    }
}

impl<S, B> Service<ServiceRequest> for AccessLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_service::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();
        let endpoint = classify_endpoint(&path);

        Box::pin(async move {
            let result = srv.call(req).await;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            let status = match &result {
                Ok(response) => response.status(),
                Err(e) => e.as_response_error().status_code(),
            };

            if status.is_server_error() {
                warn!(
                    endpoint,
                    "{} {} -> {} ({:.2} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            } else if endpoint == "health" || status == StatusCode::NOT_MODIFIED {
                debug!(
                    endpoint,
                    "{} {} -> {} ({:.2} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            } else {
                info!(
                    endpoint,
                    "{} {} -> {} ({:.2} ms)",
                    method,
                    path,
                    status.as_u16(),
                    elapsed_ms
                );
            }

            result
        })
    }
}
