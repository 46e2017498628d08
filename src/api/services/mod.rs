pub mod auth;
pub mod bookmarks;
pub mod error_code;
pub mod health;
pub mod helpers;
pub mod redirect;
pub mod shorten;
pub mod types;

use actix_web::web;

pub use auth::auth_routes;
pub use bookmarks::bookmark_routes;
pub use error_code::{ErrorBody, ErrorCode};
pub use health::{AppStartTime, HealthService};
pub use redirect::{RedirectService, redirect_routes};
pub use shorten::url_routes;

/// 注册全部路由
///
/// 短码跳转是单段路径的兜底匹配，放在最后。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(helpers::json_config())
        .app_data(helpers::query_config())
        .app_data(helpers::path_config())
        .route("/", web::get().to(HealthService::welcome))
        .route("/health", web::get().to(HealthService::health_check))
        .service(auth_routes())
        .service(bookmark_routes())
        .configure(url_routes)
        .configure(redirect_routes);
}
