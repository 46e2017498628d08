use crate::storage::models::{Bookmark, NewBookmark, UrlRecord, User, join_tags, split_tags};
use chrono::Utc;
use migration::entities::{bookmark, url, user};

/// 将 user::Model 转换为 User
pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        picture: model.picture,
        created_at: model.created_at,
    }
}

/// 将 url::Model 转换为 UrlRecord
pub fn model_to_url(model: url::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        short_code: model.short_code,
        original_url: model.original_url,
        clicks: model.clicks.max(0),
        created_at: model.created_at,
        owner_id: model.owner_id,
    }
}

/// 将 bookmark::Model 转换为 Bookmark（标签串拆回列表）
pub fn model_to_bookmark(model: bookmark::Model) -> Bookmark {
    Bookmark {
        id: model.id,
        user_id: model.user_id,
        url: model.url,
        title: model.title,
        description: model.description,
        tags: split_tags(model.tags.as_deref()),
        created_at: model.created_at,
    }
}

/// 新短链接的 ActiveModel，clicks 从 0 开始
pub fn new_url_active_model(
    short_code: &str,
    original_url: &str,
    owner_id: Option<i64>,
) -> url::ActiveModel {
    use sea_orm::ActiveValue::*;

    url::ActiveModel {
        id: NotSet,
        short_code: Set(short_code.to_string()),
        original_url: Set(original_url.to_string()),
        clicks: Set(0),
        created_at: Set(Utc::now()),
        owner_id: Set(owner_id),
    }
}

/// 新书签的 ActiveModel
pub fn new_bookmark_active_model(user_id: i64, input: &NewBookmark) -> bookmark::ActiveModel {
    use sea_orm::ActiveValue::*;

    bookmark::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        url: Set(input.url.clone()),
        title: Set(input.title.clone()),
        description: Set(input.description.clone()),
        tags: Set(join_tags(input.tags.as_deref())),
        created_at: Set(Utc::now()),
    }
}
