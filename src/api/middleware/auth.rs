//! Bearer 认证提取器
//!
//! `CurrentUser` 要求请求携带有效的 bearer token，否则 401；
//! `OptionalUser` 在同样情况下退化为匿名访问。

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header::AUTHORIZATION, web};
use futures_util::future::LocalBoxFuture;
use std::sync::Arc;
use tracing::trace;

use crate::errors::LinkmarkError;
use crate::services::AuthService;
use crate::storage::User;

/// 已认证的当前用户
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 可选认证，匿名时为 `None`
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl OptionalUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|u| u.id)
    }
}

/// 从 Authorization 头中提取 bearer token（scheme 不区分大小写）
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn auth_service(req: &HttpRequest) -> Option<web::Data<Arc<AuthService>>> {
    req.app_data::<web::Data<Arc<AuthService>>>().cloned()
}

impl FromRequest for CurrentUser {
    type Error = LinkmarkError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let service = auth_service(req);
        let token = extract_bearer_token(req);

        Box::pin(async move {
            let service = service
                .ok_or_else(|| LinkmarkError::config("AuthService is not registered as app data"))?;
            let token = token.ok_or_else(|| {
                trace!("Request without bearer token rejected");
                LinkmarkError::unauthorized("Not authenticated")
            })?;

            service.authenticate(&token).await.map(CurrentUser)
        })
    }
}

impl FromRequest for OptionalUser {
    type Error = LinkmarkError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let service = auth_service(req);
        let token = extract_bearer_token(req);

        Box::pin(async move {
            let (Some(service), Some(token)) = (service, token) else {
                return Ok(OptionalUser(None));
            };

            match service.authenticate(&token).await {
                Ok(user) => Ok(OptionalUser(Some(user))),
                Err(LinkmarkError::Unauthorized(_)) => {
                    trace!("Invalid bearer token treated as anonymous");
                    Ok(OptionalUser(None))
                }
                Err(e) => Err(e),
            }
        })
    }
}
