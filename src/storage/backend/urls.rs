//! Short URL operations for SeaOrmStorage

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};
use tracing::{debug, error};

use super::SeaOrmStorage;
use super::converters::{model_to_url, new_url_active_model};
use super::retry::{self, is_unique_violation};
use crate::errors::{LinkmarkError, Result};
use crate::storage::models::UrlRecord;

use migration::entities::url;

impl SeaOrmStorage {
    /// 插入新短链接
    ///
    /// 短码已被占用（唯一约束冲突）时返回 `Ok(None)`，由调用方换码重试。
    pub async fn insert_url(
        &self,
        short_code: &str,
        original_url: &str,
        owner_id: Option<i64>,
    ) -> Result<Option<UrlRecord>> {
        let db = &self.db;
        let active = new_url_active_model(short_code, original_url, owner_id);

        let inserted = retry::with_retry(&format!("insert_url({})", short_code), self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await;

        match inserted {
            Ok(model) => Ok(Some(model_to_url(model))),
            Err(e) if is_unique_violation(&e) => {
                debug!("Short code '{}' already taken at insert time", short_code);
                Ok(None)
            }
            Err(e) => {
                error!("插入短链接失败: {}", e);
                Err(LinkmarkError::database_operation(format!(
                    "插入短链接失败: {}",
                    e
                )))
            }
        }
    }

    pub async fn code_exists(&self, short_code: &str) -> Result<bool> {
        let db = &self.db;

        let count = retry::with_retry("code_exists", self.retry_config, || async {
            url::Entity::find()
                .filter(url::Column::ShortCode.eq(short_code))
                .count(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询短码失败: {}", e)))?;

        Ok(count > 0)
    }

    pub async fn get_url_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_url({})", short_code), self.retry_config, || async {
            url::Entity::find()
                .filter(url::Column::ShortCode.eq(short_code))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询短链接失败: {}", e)))?;

        Ok(model.map(model_to_url))
    }

    /// 原子自增点击数后重新读取
    ///
    /// 单条 `UPDATE urls SET clicks = clicks + 1 WHERE id = ?`，并发下不丢计数。
    pub async fn increment_clicks(&self, id: i64) -> Result<UrlRecord> {
        let db = &self.db;

        let result = retry::with_retry(&format!("increment_clicks({})", id), self.retry_config, || async {
            url::Entity::update_many()
                .col_expr(
                    url::Column::Clicks,
                    Expr::col(url::Column::Clicks).add(Expr::val(1i64)),
                )
                .filter(url::Column::Id.eq(id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("更新点击数失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkmarkError::link_not_found(format!("短链接不存在: id={}", id)));
        }

        let model = retry::with_retry(&format!("reload_url({})", id), self.retry_config, || async {
            url::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询短链接失败: {}", e)))?
        .ok_or_else(|| LinkmarkError::link_not_found(format!("短链接不存在: id={}", id)))?;

        Ok(model_to_url(model))
    }

    /// 某用户创建的短链接，新建的在前
    pub async fn list_urls_by_owner(&self, owner_id: i64) -> Result<Vec<UrlRecord>> {
        let db = &self.db;

        let models = retry::with_retry(&format!("list_urls({})", owner_id), self.retry_config, || async {
            url::Entity::find()
                .filter(url::Column::OwnerId.eq(owner_id))
                .order_by_desc(url::Column::CreatedAt)
                .order_by_desc(url::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询短链接列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_url).collect())
    }
}
