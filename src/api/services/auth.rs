//! 登录与当前用户接口

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use super::types::{AuthResponse, LoginRequest};
use crate::api::middleware::CurrentUser;
use crate::errors::{LinkmarkError, Result};
use crate::services::AuthService;

/// POST /auth/login（别名 /auth/google）
pub async fn login(
    auth: web::Data<Arc<AuthService>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let token = body.into_inner().token;
    if token.trim().is_empty() {
        return Err(LinkmarkError::field_validation(
            "token",
            "Identity token cannot be empty",
        ));
    }

    let outcome = auth.login(&token).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::bearer(outcome.access_token, outcome.user)))
}

/// GET /auth/me
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(user.into_inner())
}

pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login))
        .route("/google", web::post().to(login))
        .route("/me", web::get().to(me))
}
