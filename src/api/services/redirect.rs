use actix_web::http::header;
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::debug;

use super::types::RedirectTarget;
use crate::config::{AppConfig, RedirectMode};
use crate::errors::Result;
use crate::services::UrlService;

pub struct RedirectService;

impl RedirectService {
    /// GET /{short_code}
    ///
    /// 命中后先原子自增点击数再跳转，未知短码 404。
    pub async fn handle_redirect(
        path: web::Path<String>,
        urls: web::Data<Arc<UrlService>>,
        config: web::Data<Arc<AppConfig>>,
    ) -> Result<HttpResponse> {
        let short_code = path.into_inner();
        let record = urls.resolve(&short_code).await?;
        debug!(
            "Redirecting {} -> {} (clicks: {})",
            record.short_code, record.original_url, record.clicks
        );

        Ok(match config.shortener.redirect_mode {
            RedirectMode::Redirect => HttpResponse::TemporaryRedirect()
                .insert_header((header::LOCATION, record.original_url))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish(),
            RedirectMode::Json => HttpResponse::Ok().json(RedirectTarget {
                original_url: record.original_url,
            }),
        })
    }
}

/// 捕获所有单段路径，必须最后注册
pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/{short_code}",
        web::get().to(RedirectService::handle_redirect),
    );
}
