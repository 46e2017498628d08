//! 短链接创建、查询与个人列表

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use super::types::{ShortenRequest, UrlResponse};
use crate::api::middleware::{CurrentUser, OptionalUser};
use crate::errors::Result;
use crate::services::UrlService;

/// POST /shorten，带 token 时记录归属
pub async fn shorten(
    urls: web::Data<Arc<UrlService>>,
    user: OptionalUser,
    body: web::Json<ShortenRequest>,
) -> Result<HttpResponse> {
    let record = urls
        .create_short_url(&body.original_url, user.id())
        .await?;
    let short_url = urls.short_url(&record.short_code);
    Ok(HttpResponse::Ok().json(UrlResponse::from_record(record, short_url)))
}

/// GET /info/{short_code}，不计点击
pub async fn info(
    urls: web::Data<Arc<UrlService>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let record = urls.info(&path.into_inner()).await?;
    let short_url = urls.short_url(&record.short_code);
    Ok(HttpResponse::Ok().json(UrlResponse::from_record(record, short_url)))
}

/// GET /my-urls
pub async fn my_urls(urls: web::Data<Arc<UrlService>>, user: CurrentUser) -> Result<HttpResponse> {
    let records = urls.list_for_owner(user.0.id).await?;
    let body: Vec<UrlResponse> = records
        .into_iter()
        .map(|record| {
            let short_url = urls.short_url(&record.short_code);
            UrlResponse::from_record(record, short_url)
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

pub fn url_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/shorten", web::post().to(shorten))
        .route("/my-urls", web::get().to(my_urls))
        .route("/info/{short_code}", web::get().to(info));
}
