use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 标签在数据库中的分隔符
pub const TAG_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 登录时从身份提供方拿到的用户资料
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

/// 新建书签的输入
#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// 书签的部分更新
///
/// 外层 `None` 表示字段未出现（保持不变），`Some(None)` 表示显式置空。
/// `url` 不可置空，所以只有一层 Option。
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub tags: Option<Option<Vec<String>>>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

/// 书签列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct BookmarkFilter {
    /// 在 title / url / description 中做不区分大小写的子串匹配
    pub search: Option<String>,
    /// 在拼接后的标签串中做不区分大小写的子串匹配
    pub tag: Option<String>,
}

impl BookmarkFilter {
    /// 空字符串视为未提供
    pub fn new(search: Option<String>, tag: Option<String>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            tag: tag.filter(|t| !t.is_empty()),
        }
    }
}

/// 标签列表拼接为存储串，空列表存为 NULL
pub fn join_tags(tags: Option<&[String]>) -> Option<String> {
    match tags {
        Some(list) if !list.is_empty() => Some(list.join(&TAG_SEPARATOR.to_string())),
        _ => None,
    }
}

/// 存储串拆回标签列表
pub fn split_tags(stored: Option<&str>) -> Option<Vec<String>> {
    stored.map(|s| s.split(TAG_SEPARATOR).map(str::to_string).collect())
}
