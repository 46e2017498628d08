use anyhow::{Context, Result};
use actix_web::web;
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::jwt::JwtService;
use crate::api::services::{AppStartTime, configure_routes};
use crate::config::AppConfig;
use crate::services::{
    AuthService, BookmarkService, GoogleIdentityVerifier, IdentityVerifier, UrlService,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 服务器运行所需的全部共享状态
#[derive(Clone)]
pub struct StartupContext {
    pub config: Arc<AppConfig>,
    pub storage: Arc<SeaOrmStorage>,
    pub url_service: Arc<UrlService>,
    pub bookmark_service: Arc<BookmarkService>,
    pub auth_service: Arc<AuthService>,
    pub start_time: AppStartTime,
}

impl StartupContext {
    /// 用已连接的存储和身份校验器组装服务
    pub fn assemble(
        config: Arc<AppConfig>,
        storage: Arc<SeaOrmStorage>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Result<Self> {
        let jwt = Arc::new(
            JwtService::from_config(&config.auth).context("Failed to initialize JWT service")?,
        );

        let url_service = Arc::new(UrlService::new(storage.clone(), &config.shortener));
        let bookmark_service = Arc::new(BookmarkService::new(storage.clone()));
        let auth_service = Arc::new(AuthService::new(storage.clone(), verifier, jwt));

        Ok(Self {
            config,
            storage,
            url_service,
            bookmark_service,
            auth_service,
            start_time: AppStartTime::now(),
        })
    }

    /// 注册共享状态与路由，服务器和集成测试共用
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.url_service.clone()))
            .app_data(web::Data::new(self.bookmark_service.clone()))
            .app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.start_time.clone()))
            .configure(configure_routes);
    }
}

/// 准备服务器启动的上下文
///
/// 连接数据库并执行迁移，再按配置组装各服务。
pub async fn prepare_server_startup(config: Arc<AppConfig>) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    info!(
        "Short links served in '{}' mode at {}",
        config.shortener.redirect_mode, config.shortener.base_url
    );

    let verifier: Arc<dyn IdentityVerifier> = Arc::new(GoogleIdentityVerifier::new(&config.auth));
    let context = StartupContext::assemble(config, storage, verifier)?;

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
