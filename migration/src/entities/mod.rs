pub mod bookmark;
pub mod url;
pub mod user;

pub use bookmark::Entity as BookmarkEntity;
pub use url::Entity as UrlEntity;
pub use user::Entity as UserEntity;
