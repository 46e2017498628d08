//! API 请求/响应类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{LinkmarkError, Result};
use crate::storage::{BookmarkFilter, BookmarkPatch, NewBookmark, UrlRecord, User};

/// 区分「字段缺失」与「显式 null」
///
/// 配合 `#[serde(default)]` 使用：缺失 → `None`，`null` → `Some(None)`。
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    pub original_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlResponse {
    pub fn from_record(record: UrlRecord, short_url: String) -> Self {
        Self {
            original_url: record.original_url,
            short_code: record.short_code,
            short_url,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}

/// json 跳转模式下的响应
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RedirectTarget {
    pub original_url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    #[serde(alias = "identity_token")]
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

impl AuthResponse {
    pub fn bearer(access_token: String, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BookmarkCreate {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl From<BookmarkCreate> for NewBookmark {
    fn from(body: BookmarkCreate) -> Self {
        NewBookmark {
            url: body.url,
            title: body.title,
            description: body.description,
            tags: body.tags,
        }
    }
}

/// 书签部分更新
///
/// 只有出现在请求体里的字段会被修改。`tags: []` 与 `tags: null` 都会清空标签。
#[derive(Deserialize, Clone, Debug, Default)]
pub struct BookmarkUpdate {
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tags: Option<Option<Vec<String>>>,
}

impl BookmarkUpdate {
    pub fn into_patch(self) -> Result<BookmarkPatch> {
        let url = match self.url {
            Some(None) => {
                return Err(LinkmarkError::field_validation("url", "URL cannot be null"));
            }
            Some(Some(url)) => Some(url),
            None => None,
        };

        Ok(BookmarkPatch {
            url,
            title: self.title,
            description: self.description,
            tags: self.tags,
        })
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct BookmarkQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl From<BookmarkQuery> for BookmarkFilter {
    fn from(query: BookmarkQuery) -> Self {
        BookmarkFilter::new(query.search, query.tag)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DatabaseHealth {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime_secs: u64,
    pub database: DatabaseHealth,
    pub response_time_ms: u32,
}
