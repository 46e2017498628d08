use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use super::types::{DatabaseHealth, HealthResponse, MessageResponse};
use crate::storage::SeaOrmStorage;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

/// Health Service
///
/// 直接调用 storage 的 ping，不经过业务服务层。
pub struct HealthService;

impl HealthService {
    pub async fn welcome() -> impl Responder {
        HttpResponse::Ok().json(MessageResponse {
            message: "Welcome to the linkmark API.".to_string(),
        })
    }

    pub async fn health_check(
        storage: web::Data<Arc<SeaOrmStorage>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let backend = storage.backend_name().to_string();
        let database = match tokio::time::timeout(Duration::from_secs(5), storage.ping()).await {
            Ok(Ok(())) => DatabaseHealth {
                status: "healthy".to_string(),
                backend,
                error: None,
            },
            Ok(Err(e)) => {
                error!("Database health check failed: {}", e);
                DatabaseHealth {
                    status: "unhealthy".to_string(),
                    backend,
                    error: Some("database error".to_string()),
                }
            }
            Err(_) => {
                error!("Database health check timeout");
                DatabaseHealth {
                    status: "unhealthy".to_string(),
                    backend,
                    error: Some("timeout".to_string()),
                }
            }
        };

        let now = chrono::Utc::now();
        let uptime_secs = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;
        let is_healthy = database.error.is_none();

        let status = if is_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        HttpResponse::build(status).json(HealthResponse {
            status: database.status.clone(),
            timestamp: now.to_rfc3339(),
            uptime_secs,
            database,
            response_time_ms: start_time.elapsed().as_millis() as u32,
        })
    }
}
