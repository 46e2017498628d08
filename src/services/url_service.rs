//! Short URL service
//!
//! 创建（校验 + 分配短码 + 插入）、解析访问、查询信息和按用户列出。

use std::sync::Arc;

use tracing::{info, warn};

use super::short_code::ShortCodeAllocator;
use crate::config::ShortenerConfig;
use crate::errors::{LinkmarkError, Result};
use crate::storage::{SeaOrmStorage, UrlRecord};
use crate::utils::url_validator::normalize_url;

pub struct UrlService {
    storage: Arc<SeaOrmStorage>,
    allocator: ShortCodeAllocator,
    base_url: String,
}

impl UrlService {
    pub fn new(storage: Arc<SeaOrmStorage>, config: &ShortenerConfig) -> Self {
        let allocator = ShortCodeAllocator::new(
            storage.clone(),
            config.code_length,
            config.max_code_attempts,
        );
        Self::with_allocator(storage, allocator, &config.base_url)
    }

    pub fn with_allocator(
        storage: Arc<SeaOrmStorage>,
        allocator: ShortCodeAllocator,
        base_url: &str,
    ) -> Self {
        Self {
            storage,
            allocator,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 对外的完整短链接地址
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// 创建短链接
    ///
    /// 插入时撞上唯一索引（并发下另一请求抢先用了同一短码）会换码重试，
    /// 与分配阶段共用同一生成配额。
    pub async fn create_short_url(&self, original_url: &str, owner_id: Option<i64>) -> Result<UrlRecord> {
        let normalized = normalize_url(original_url)
            .map_err(|e| LinkmarkError::field_validation("original_url", e.to_string()))?;

        let mut budget = self.allocator.budget();
        loop {
            let code = self.allocator.allocate_within(&mut budget).await?;

            match self.storage.insert_url(&code, &normalized, owner_id).await? {
                Some(record) => {
                    info!(
                        "Short URL created: {} -> {} (owner: {:?})",
                        record.short_code, record.original_url, record.owner_id
                    );
                    return Ok(record);
                }
                None => {
                    warn!("Short code '{}' was taken concurrently, regenerating", code);
                }
            }
        }
    }

    pub async fn get_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>> {
        self.storage.get_url_by_code(short_code).await
    }

    /// 查询短链接信息，不计点击
    pub async fn info(&self, short_code: &str) -> Result<UrlRecord> {
        self.get_by_code(short_code)
            .await?
            .ok_or_else(|| LinkmarkError::link_not_found("Short URL not found"))
    }

    /// 访问短链接：查到后原子自增点击数
    pub async fn resolve(&self, short_code: &str) -> Result<UrlRecord> {
        let record = self.info(short_code).await?;
        self.storage.increment_clicks(record.id).await
    }

    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<UrlRecord>> {
        self.storage.list_urls_by_owner(owner_id).await
    }
}
