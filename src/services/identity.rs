//! 外部身份令牌校验
//!
//! 登录流程只依赖 `IdentityVerifier` trait，测试中替换为假实现。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};
use ureq::Agent;

use crate::config::AuthConfig;
use crate::errors::{LinkmarkError, Result};
use crate::storage::UserProfile;

/// HTTP 请求超时时间
const HTTP_TIMEOUT_SECS: u64 = 5;

const GOOGLE_ISSUERS: &[&str] = &["accounts.google.com", "https://accounts.google.com"];

/// 校验外部签发的身份令牌，返回已验证的用户资料
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserProfile>;

    fn name(&self) -> &'static str;
}

/// tokeninfo 接口返回的字段（数值字段以字符串形式返回）
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: Option<String>,
    iss: Option<String>,
    exp: Option<String>,
    email: Option<String>,
    email_verified: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    /// 校验受众、签发方、过期时间和邮箱验证状态
    fn into_profile(self, client_id: &str, now: i64) -> Result<UserProfile> {
        let invalid = |reason: &str| LinkmarkError::unauthorized(format!("Invalid Google token: {}", reason));

        if self.aud.as_deref() != Some(client_id) {
            return Err(invalid("audience mismatch"));
        }

        if !self.iss.as_deref().is_some_and(|iss| GOOGLE_ISSUERS.contains(&iss)) {
            return Err(invalid("unexpected issuer"));
        }

        let exp: i64 = self
            .exp
            .as_deref()
            .and_then(|e| e.parse().ok())
            .ok_or_else(|| invalid("missing expiry"))?;
        if exp <= now {
            return Err(invalid("token expired"));
        }

        let email = self
            .email
            .filter(|e| !e.is_empty())
            .ok_or_else(|| invalid("missing email"))?;

        if self.email_verified.as_deref() != Some("true") {
            return Err(invalid("email not verified"));
        }

        Ok(UserProfile {
            email,
            name: self.name,
            picture: self.picture,
        })
    }
}

/// 通过 Google tokeninfo 接口校验 ID token
pub struct GoogleIdentityVerifier {
    agent: Agent,
    tokeninfo_url: String,
    client_id: String,
}

impl GoogleIdentityVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        if config.google_client_id.is_empty() {
            warn!("auth.google_client_id is empty, every Google login will be rejected");
        }

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(HTTP_TIMEOUT_SECS)))
            .build()
            .into();

        Self {
            agent,
            tokeninfo_url: config.google_tokeninfo_url.clone(),
            client_id: config.google_client_id.clone(),
        }
    }

    /// 同步请求 tokeninfo（在 spawn_blocking 中调用）
    fn fetch_token_info_sync(agent: Agent, url: String, token: String) -> Result<TokenInfo> {
        let resp = agent.get(&url).query("id_token", &token).call().map_err(|e| match e {
            ureq::Error::StatusCode(status) => {
                debug!("tokeninfo rejected the token with status {}", status);
                LinkmarkError::unauthorized("Invalid Google token")
            }
            other => LinkmarkError::identity_provider(format!(
                "Google tokeninfo request failed: {}",
                other
            )),
        })?;

        resp.into_body().read_json::<TokenInfo>().map_err(|e| {
            LinkmarkError::identity_provider(format!("Failed to parse tokeninfo response: {}", e))
        })
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<UserProfile> {
        if token.trim().is_empty() {
            return Err(LinkmarkError::unauthorized("Invalid Google token: empty token"));
        }
        if self.client_id.is_empty() {
            return Err(LinkmarkError::unauthorized(
                "Google login is not configured on this server",
            ));
        }

        let agent = self.agent.clone();
        let url = self.tokeninfo_url.clone();
        let token = token.to_string();

        let info = tokio::task::spawn_blocking(move || Self::fetch_token_info_sync(agent, url, token))
            .await
            .map_err(|e| LinkmarkError::identity_provider(format!("tokeninfo task failed: {}", e)))??;

        let profile = info.into_profile(&self.client_id, chrono::Utc::now().timestamp())?;
        info!("Google identity verified for {}", profile.email);
        Ok(profile)
    }

    fn name(&self) -> &'static str {
        "Google"
    }
}
