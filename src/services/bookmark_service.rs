//! Bookmark service
//!
//! 所有操作都限定在调用者自己的书签内，越权访问与不存在同样返回 404。

use std::sync::Arc;

use crate::errors::{LinkmarkError, Result};
use crate::storage::{Bookmark, BookmarkFilter, BookmarkPatch, NewBookmark, SeaOrmStorage};

pub struct BookmarkService {
    storage: Arc<SeaOrmStorage>,
}

fn ensure_url_present(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(LinkmarkError::field_validation("url", "URL cannot be empty"));
    }
    Ok(())
}

impl BookmarkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn create(&self, owner_id: i64, input: NewBookmark) -> Result<Bookmark> {
        ensure_url_present(&input.url)?;
        self.storage.create_bookmark(owner_id, &input).await
    }

    pub async fn list(&self, owner_id: i64, filter: &BookmarkFilter) -> Result<Vec<Bookmark>> {
        self.storage.list_bookmarks(owner_id, filter).await
    }

    pub async fn fetch_owned(&self, id: i64, caller_id: i64) -> Result<Bookmark> {
        self.storage.fetch_owned_bookmark(id, caller_id).await
    }

    pub async fn update(&self, id: i64, caller_id: i64, patch: BookmarkPatch) -> Result<Bookmark> {
        if let Some(ref url) = patch.url {
            ensure_url_present(url)?;
        }
        let existing = self.fetch_owned(id, caller_id).await?;
        self.storage.update_bookmark(existing.id, &patch).await
    }

    pub async fn delete(&self, id: i64, caller_id: i64) -> Result<()> {
        let existing = self.fetch_owned(id, caller_id).await?;
        self.storage.delete_bookmark(existing.id).await
    }
}
