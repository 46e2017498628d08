//! Server mode
//!
//! 组装中间件与路由，启动 HTTP 服务器并等待关闭信号。

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::header,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use crate::api::middleware::{AccessLog, RequestIdMiddleware};
use crate::config::{AppConfig, CorsConfig};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.enabled && cors_config.allowed_origins.is_empty() {
        warn!(
            "CORS enabled but allowed_origins is empty. \
            No cross-origin requests will be allowed."
        );
    }
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    // 关闭时使用浏览器默认的同源策略
    if !cors_config.enabled {
        return Cors::default();
    }

    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);
    let mut cors = Cors::default()
        .allow_any_method()
        .allowed_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id.clone(),
        ])
        .expose_headers([request_id])
        .max_age(cors_config.max_age as usize);

    if cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

/// Run the HTTP server
///
/// **Note**: 调用前必须已初始化日志系统
pub async fn run_server(config: Arc<AppConfig>) -> Result<()> {
    let startup = lifetime::prepare_server_startup(config.clone())
        .await
        .map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?;

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.workers.clamp(1, 32);
    warn!("Using {} workers for the server", workers);

    let db_for_shutdown = startup.storage.get_db().clone();

    let server = HttpServer::new(move || {
        let startup = startup.clone();

        App::new()
            .wrap(AccessLog) // 最内层，记录状态码与耗时
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(build_cors_middleware(&cors_config))
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .configure(|cfg| startup.register(cfg))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server.bind(&bind_address)?.run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
