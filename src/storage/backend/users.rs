//! User operations for SeaOrmStorage

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::model_to_user;
use super::retry::{self, is_unique_violation};
use crate::errors::{LinkmarkError, Result};
use crate::storage::models::{User, UserProfile};

use migration::entities::user;

impl SeaOrmStorage {
    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let db = &self.db;

        let model = retry::with_retry(&format!("find_user({})", id), self.retry_config, || async {
            user::Entity::find_by_id(id).one(db).await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询用户失败: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.find_user_model_by_email(email).await?.map(model_to_user))
    }

    async fn find_user_model_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let db = &self.db;

        retry::with_retry("find_user_by_email", self.retry_config, || async {
            user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .one(db)
                .await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("查询用户失败: {}", e)))
    }

    /// 登录时按 email 创建或刷新用户资料
    ///
    /// 已存在时覆盖 name / picture，id 和 email 不变。
    /// 并发首次登录撞上唯一约束时，重新读取后走刷新分支。
    pub async fn upsert_user(&self, profile: &UserProfile) -> Result<User> {
        if let Some(existing) = self.find_user_model_by_email(&profile.email).await? {
            return self.refresh_profile(existing, profile).await;
        }

        let db = &self.db;
        let active = user::ActiveModel {
            email: Set(profile.email.clone()),
            name: Set(profile.name.clone()),
            picture: Set(profile.picture.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let inserted = retry::with_retry("insert_user", self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await;

        match inserted {
            Ok(model) => {
                info!("User created: id={}", model.id);
                Ok(model_to_user(model))
            }
            Err(e) if is_unique_violation(&e) => {
                debug!("Concurrent first login detected, refreshing existing user");
                let existing = self
                    .find_user_model_by_email(&profile.email)
                    .await?
                    .ok_or_else(|| {
                        LinkmarkError::database_operation("用户写入冲突后未能读取到记录")
                    })?;
                self.refresh_profile(existing, profile).await
            }
            Err(e) => Err(LinkmarkError::database_operation(format!(
                "创建用户失败: {}",
                e
            ))),
        }
    }

    async fn refresh_profile(&self, existing: user::Model, profile: &UserProfile) -> Result<User> {
        let db = &self.db;
        let user_id = existing.id;

        let mut active: user::ActiveModel = existing.into();
        active.name = Set(profile.name.clone());
        active.picture = Set(profile.picture.clone());

        let model = retry::with_retry(&format!("refresh_user({})", user_id), self.retry_config, || {
            let active = active.clone();
            async move { active.update(db).await }
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("更新用户资料失败: {}", e)))?;

        debug!("User profile refreshed: id={}", user_id);
        Ok(model_to_user(model))
    }

    /// 删除用户（书签级联删除，短链接 owner_id 置空）
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let db = &self.db;

        let result = retry::with_retry(&format!("delete_user({})", id), self.retry_config, || async {
            user::Entity::delete_by_id(id).exec(db).await
        })
        .await
        .map_err(|e| LinkmarkError::database_operation(format!("删除用户失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(LinkmarkError::not_found(format!("用户不存在: {}", id)));
        }

        info!("User deleted: id={}", id);
        Ok(())
    }
}
