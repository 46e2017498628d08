//! Bookmark operations for SeaOrmStorage
//!
//! 存储层不做归属校验，除 `fetch_owned_bookmark` 外的按 id 操作都是未限定范围的。

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, Condition,
    EntityTrait, ExprTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, Func},
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{model_to_bookmark, new_bookmark_active_model};
use super::retry;
use crate::errors::{LinkmarkError, Result};
use crate::storage::models::{Bookmark, BookmarkFilter, BookmarkPatch, NewBookmark, join_tags};

use migration::entities::bookmark;

/// `lower(col) LIKE '%term%'`
fn contains_ignore_case(column: bookmark::Column, pattern: &str) -> Expr {
    Func::lower(Expr::col(column)).like(pattern)
}

/// 构造列表查询条件
///
/// search 匹配 title / url / description 任一列，tag 匹配拼接后的标签串。
/// 两者同时提供时取交集。LIKE 通配符不做转义。
fn list_condition(user_id: i64, filter: &BookmarkFilter) -> Condition {
    let mut condition = Condition::all().add(bookmark::Column::UserId.eq(user_id));

    if let Some(ref search) = filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(contains_ignore_case(bookmark::Column::Title, &pattern))
                .add(contains_ignore_case(bookmark::Column::Url, &pattern))
                .add(contains_ignore_case(bookmark::Column::Description, &pattern)),
        );
    }

    if let Some(ref tag) = filter.tag {
        let pattern = format!("%{}%", tag.to_lowercase());
        condition = condition.add(contains_ignore_case(bookmark::Column::Tags, &pattern));
    }

    condition
}

impl SeaOrmStorage {
    pub async fn create_bookmark(&self, user_id: i64, input: &NewBookmark) -> Result<Bookmark> {
        let db = &self.db;
        let active = new_bookmark_active_model(user_id, input);

        let model = retry::with_retry("create_bookmark", self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("创建书签失败: {}", e)))?;

        info!("Bookmark created: id={} user={}", model.id, user_id);
        Ok(model_to_bookmark(model))
    }

    /// 某用户的书签，新建的在前
    pub async fn list_bookmarks(&self, user_id: i64, filter: &BookmarkFilter) -> Result<Vec<Bookmark>> {
        let db = &self.db;
        let condition = list_condition(user_id, filter);

        let models = retry::with_retry(&format!("list_bookmarks({})", user_id), self.retry_config, || async {
            bookmark::Entity::find()
                .filter(condition.clone())
                .order_by_desc(bookmark::Column::CreatedAt)
                .order_by_desc(bookmark::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询书签列表失败: {}", e)))?;

        debug!("Listed {} bookmarks for user {}", models.len(), user_id);
        Ok(models.into_iter().map(model_to_bookmark).collect())
    }

    pub async fn get_bookmark(&self, id: i64) -> Result<Option<Bookmark>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("get_bookmark({})", id), self.retry_config, || async {
            bookmark::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询书签失败: {}", e)))?;

        Ok(model.map(model_to_bookmark))
    }

    /// 按调用者限定范围读取书签
    ///
    /// 不存在和不属于调用者都返回 NotFound，两者对外不可区分。
    pub async fn fetch_owned_bookmark(&self, id: i64, caller_id: i64) -> Result<Bookmark> {
        match self.get_bookmark(id).await? {
            Some(bookmark) if bookmark.user_id == caller_id => Ok(bookmark),
            _ => Err(LinkmarkError::not_found("Bookmark not found")),
        }
    }

    /// 只更新 patch 中出现的字段
    pub async fn update_bookmark(&self, id: i64, patch: &BookmarkPatch) -> Result<Bookmark> {
        if patch.is_empty() {
            return self
                .get_bookmark(id)
                .await?
                .ok_or_else(|| LinkmarkError::not_found("Bookmark not found"));
        }

        let mut active = bookmark::ActiveModel {
            id: Unchanged(id),
            ..Default::default()
        };
        if let Some(ref url) = patch.url {
            active.url = Set(url.clone());
        }
        if let Some(ref title) = patch.title {
            active.title = Set(title.clone());
        }
        if let Some(ref description) = patch.description {
            active.description = Set(description.clone());
        }
        if let Some(ref tags) = patch.tags {
            active.tags = Set(join_tags(tags.as_deref()));
        }

        let db = &self.db;
        let model = retry::with_retry(&format!("update_bookmark({})", id), self.retry_config, || {
            let active = active.clone();
            async move { active.update(db).await }
        })
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => LinkmarkError::not_found("Bookmark not found"),
            other => LinkmarkError::database_operation(format!("更新书签失败: {}", other)),
        })?;

        debug!("Bookmark updated: id={}", id);
        Ok(model_to_bookmark(model))
    }

    pub async fn delete_bookmark(&self, id: i64) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("delete_bookmark({})", id), self.retry_config, || async {
            bookmark::Entity::delete_by_id(id).exec(db).await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("删除书签失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkmarkError::not_found("Bookmark not found"));
        }

        info!("Bookmark deleted: id={}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(filter: &BookmarkFilter) -> String {
        bookmark::Entity::find()
            .filter(list_condition(7, filter))
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_unfiltered_condition_scopes_to_owner() {
        let sql = sql_for(&BookmarkFilter::default());
        assert!(sql.contains(r#""user_id" = 7"#));
        assert!(!sql.contains("LIKE"));
    }

    #[test]
    fn test_search_matches_three_columns_lowercased() {
        let sql = sql_for(&BookmarkFilter::new(Some("FastAPI".into()), None));
        assert!(sql.contains("'%fastapi%'"));
        assert!(sql.contains(r#"LOWER("title")"#) || sql.contains(r#"LOWER("bookmarks"."title")"#));
        assert_eq!(sql.matches("LIKE").count(), 3);
        assert!(sql.contains(" OR "));
    }

    #[test]
    fn test_tag_and_search_combine_with_and() {
        let sql = sql_for(&BookmarkFilter::new(Some("rust".into()), Some("Python".into())));
        assert_eq!(sql.matches("LIKE").count(), 4);
        assert!(sql.contains("'%python%'"));
    }
}
