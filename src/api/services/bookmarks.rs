//! 书签 CRUD，全部限定在当前用户内

use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::info;

use super::helpers::created;
use super::types::{BookmarkCreate, BookmarkQuery, BookmarkUpdate};
use crate::api::middleware::CurrentUser;
use crate::errors::Result;
use crate::services::BookmarkService;

pub async fn create_bookmark(
    bookmarks: web::Data<Arc<BookmarkService>>,
    user: CurrentUser,
    body: web::Json<BookmarkCreate>,
) -> Result<HttpResponse> {
    let bookmark = bookmarks.create(user.0.id, body.into_inner().into()).await?;
    info!("Bookmark {} created for user {}", bookmark.id, bookmark.user_id);
    Ok(created(&bookmark))
}

pub async fn list_bookmarks(
    bookmarks: web::Data<Arc<BookmarkService>>,
    user: CurrentUser,
    query: web::Query<BookmarkQuery>,
) -> Result<HttpResponse> {
    let filter = query.into_inner().into();
    let items = bookmarks.list(user.0.id, &filter).await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn update_bookmark(
    bookmarks: web::Data<Arc<BookmarkService>>,
    user: CurrentUser,
    path: web::Path<i64>,
    body: web::Json<BookmarkUpdate>,
) -> Result<HttpResponse> {
    let patch = body.into_inner().into_patch()?;
    let bookmark = bookmarks.update(path.into_inner(), user.0.id, patch).await?;
    Ok(HttpResponse::Ok().json(bookmark))
}

pub async fn delete_bookmark(
    bookmarks: web::Data<Arc<BookmarkService>>,
    user: CurrentUser,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    bookmarks.delete(id, user.0.id).await?;
    info!("Bookmark {} deleted by user {}", id, user.0.id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn bookmark_routes() -> actix_web::Scope {
    web::scope("/bookmarks")
        .route("", web::post().to(create_bookmark))
        .route("", web::get().to(list_bookmarks))
        .route("/{id}", web::put().to(update_bookmark))
        .route("/{id}", web::delete().to(delete_bookmark))
}
