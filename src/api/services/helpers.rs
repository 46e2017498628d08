//! 提取器配置：请求体、查询串和路径参数解析失败统一返回 422

use actix_web::{HttpResponse, web};
use tracing::debug;

use crate::errors::LinkmarkError;

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, req| {
            debug!("Rejected JSON body on {}: {}", req.path(), err);
            LinkmarkError::validation(err.to_string()).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        debug!("Rejected query string on {}: {}", req.path(), err);
        LinkmarkError::validation(err.to_string()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        debug!("Rejected path parameters on {}: {}", req.path(), err);
        LinkmarkError::validation(err.to_string()).into()
    })
}

/// 201 Created + JSON
pub fn created<T: serde::Serialize>(data: &T) -> HttpResponse {
    HttpResponse::Created().json(data)
}
