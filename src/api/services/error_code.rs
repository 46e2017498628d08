//! 统一 API 错误码与错误响应

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::error;

use crate::errors::LinkmarkError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 短链接错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 通用错误 1000-1099
    NotFound = 1004,
    InternalServerError = 1005,
    UnprocessableEntity = 1022,

    // 认证错误 2000-2099
    AuthFailed = 2000,

    // 短链接错误 3000-3099
    LinkNotFound = 3000,
}

impl From<&LinkmarkError> for ErrorCode {
    fn from(err: &LinkmarkError) -> Self {
        match err {
            LinkmarkError::Validation { .. } => ErrorCode::UnprocessableEntity,
            LinkmarkError::Unauthorized(_) => ErrorCode::AuthFailed,
            LinkmarkError::NotFound(_) => ErrorCode::NotFound,
            LinkmarkError::LinkNotFound(_) => ErrorCode::LinkNotFound,
            _ => ErrorCode::InternalServerError,
        }
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ResponseError for LinkmarkError {
    fn status_code(&self) -> StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        // 500 的细节只写日志
        let message = if self.is_internal() {
            error!("{} [{}]: {}", self.error_type(), self.code(), self.message());
            "Internal server error".to_string()
        } else {
            self.message().to_string()
        };

        let mut builder = HttpResponse::build(self.status_code());
        if matches!(self, LinkmarkError::Unauthorized(_)) {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.json(ErrorBody {
            code: ErrorCode::from(self),
            message,
            field: self.field().map(str::to_string),
        })
    }
}
