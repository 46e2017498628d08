use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkmarkError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    /// 输入校验失败，`field` 指出出错的请求字段
    Validation {
        field: Option<String>,
        message: String,
    },
    NotFound(String),
    LinkNotFound(String),
    Unauthorized(String),
    Serialization(String),
    TokenCreation(String),
    IdentityProvider(String),
    CodeSpaceExhausted(String),
}

impl LinkmarkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkmarkError::Config(_) => "E001",
            LinkmarkError::DatabaseConfig(_) => "E002",
            LinkmarkError::DatabaseConnection(_) => "E003",
            LinkmarkError::DatabaseOperation(_) => "E004",
            LinkmarkError::FileOperation(_) => "E005",
            LinkmarkError::Validation { .. } => "E006",
            LinkmarkError::NotFound(_) => "E007",
            LinkmarkError::LinkNotFound(_) => "E008",
            LinkmarkError::Unauthorized(_) => "E009",
            LinkmarkError::Serialization(_) => "E010",
            LinkmarkError::TokenCreation(_) => "E011",
            LinkmarkError::IdentityProvider(_) => "E012",
            LinkmarkError::CodeSpaceExhausted(_) => "E013",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkmarkError::Config(_) => "Configuration Error",
            LinkmarkError::DatabaseConfig(_) => "Database Configuration Error",
            LinkmarkError::DatabaseConnection(_) => "Database Connection Error",
            LinkmarkError::DatabaseOperation(_) => "Database Operation Error",
            LinkmarkError::FileOperation(_) => "File Operation Error",
            LinkmarkError::Validation { .. } => "Validation Error",
            LinkmarkError::NotFound(_) => "Resource Not Found",
            LinkmarkError::LinkNotFound(_) => "Short Link Not Found",
            LinkmarkError::Unauthorized(_) => "Unauthorized",
            LinkmarkError::Serialization(_) => "Serialization Error",
            LinkmarkError::TokenCreation(_) => "Token Creation Error",
            LinkmarkError::IdentityProvider(_) => "Identity Provider Error",
            LinkmarkError::CodeSpaceExhausted(_) => "Short Code Space Exhausted",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkmarkError::Config(msg) => msg,
            LinkmarkError::DatabaseConfig(msg) => msg,
            LinkmarkError::DatabaseConnection(msg) => msg,
            LinkmarkError::DatabaseOperation(msg) => msg,
            LinkmarkError::FileOperation(msg) => msg,
            LinkmarkError::Validation { message, .. } => message,
            LinkmarkError::NotFound(msg) => msg,
            LinkmarkError::LinkNotFound(msg) => msg,
            LinkmarkError::Unauthorized(msg) => msg,
            LinkmarkError::Serialization(msg) => msg,
            LinkmarkError::TokenCreation(msg) => msg,
            LinkmarkError::IdentityProvider(msg) => msg,
            LinkmarkError::CodeSpaceExhausted(msg) => msg,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            LinkmarkError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkmarkError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LinkmarkError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkmarkError::NotFound(_) | LinkmarkError::LinkNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否属于服务端内部错误（详情只写日志，不返回给客户端）
    pub fn is_internal(&self) -> bool {
        self.http_status().is_server_error()
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkmarkError {}

// 便捷的构造函数
impl LinkmarkError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::Validation {
            field: None,
            message: msg.into(),
        }
    }

    pub fn field_validation<F: Into<String>, T: Into<String>>(field: F, msg: T) -> Self {
        LinkmarkError::Validation {
            field: Some(field.into()),
            message: msg.into(),
        }
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::NotFound(msg.into())
    }

    pub fn link_not_found<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::LinkNotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::Serialization(msg.into())
    }

    pub fn token_creation<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::TokenCreation(msg.into())
    }

    pub fn identity_provider<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::IdentityProvider(msg.into())
    }

    pub fn code_space_exhausted<T: Into<String>>(msg: T) -> Self {
        LinkmarkError::CodeSpaceExhausted(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkmarkError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkmarkError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkmarkError {
    fn from(err: std::io::Error) -> Self {
        LinkmarkError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkmarkError {
    fn from(err: serde_json::Error) -> Self {
        LinkmarkError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for LinkmarkError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        LinkmarkError::Unauthorized(err.to_string())
    }
}

impl From<config::ConfigError> for LinkmarkError {
    fn from(err: config::ConfigError) -> Self {
        LinkmarkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkmarkError>;
