use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::errors::{LinkmarkError, Result};

const ACCESS_TOKEN_TYPE: &str = "access";

/// Access Token Claims
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 用户 id 的十进制字符串
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    pub token_type: String,
}

impl AccessClaims {
    /// subject 解析为用户 id，非数字返回 None
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// JWT Service for issuing and validating bearer tokens
pub struct JwtService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, algorithm: Algorithm, access_token_minutes: u64) -> Self {
        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_minutes,
        }
    }

    /// Create JwtService from config
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        if config.uses_default_secret() {
            tracing::warn!(
                "auth.jwt_secret is still the default value, set LINKMARK__AUTH__JWT_SECRET before going to production"
            );
        }

        Ok(Self::new(
            &config.jwt_secret,
            config.algorithm()?,
            config.jwt_expire_minutes,
        ))
    }

    /// 为用户签发 access token
    pub fn issue_access_token(&self, user_id: i64, email: &str) -> Result<String> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.access_token_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                LinkmarkError::token_creation(format!(
                    "Token lifetime of {} minutes is out of range",
                    self.access_token_minutes
                ))
            })?;
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| LinkmarkError::token_creation(format!("Failed to sign token: {}", e)))
    }

    /// Validate Access Token（签名、算法、过期时间、类型）
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> std::result::Result<AccessClaims, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &Validation::new(self.algorithm))?;

        if token_data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }

        Ok(token_data.claims)
    }
}
