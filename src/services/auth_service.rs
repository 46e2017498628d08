//! Login and bearer-token resolution

use std::sync::Arc;

use tracing::{debug, info};

use super::identity::IdentityVerifier;
use crate::api::jwt::JwtService;
use crate::errors::{LinkmarkError, Result};
use crate::storage::{SeaOrmStorage, User};

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub user: User,
}

pub struct AuthService {
    storage: Arc<SeaOrmStorage>,
    verifier: Arc<dyn IdentityVerifier>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(
        storage: Arc<SeaOrmStorage>,
        verifier: Arc<dyn IdentityVerifier>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            storage,
            verifier,
            jwt,
        }
    }

    /// 校验身份令牌 → 按 email upsert 用户 → 签发新 token
    pub async fn login(&self, identity_token: &str) -> Result<LoginOutcome> {
        let profile = self.verifier.verify(identity_token).await?;
        let user = self.storage.upsert_user(&profile).await?;
        let access_token = self.jwt.issue_access_token(user.id, &user.email)?;

        info!("User {} logged in via {}", user.id, self.verifier.name());
        Ok(LoginOutcome { access_token, user })
    }

    /// bearer token 解析为当前用户
    ///
    /// 签名无效、过期、subject 非数字或用户已不存在都返回 Unauthorized。
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.jwt.validate_access_token(token).map_err(|e| {
            debug!("Bearer token validation failed: {}", e);
            LinkmarkError::unauthorized("Could not validate credentials")
        })?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| LinkmarkError::unauthorized("Could not validate credentials"))?;

        self.storage
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| {
                debug!("Token subject {} no longer exists", user_id);
                LinkmarkError::unauthorized("Could not validate credentials")
            })
    }
}
