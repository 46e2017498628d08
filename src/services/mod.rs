//! Service layer for business logic
//!
//! HTTP handlers only talk to these services; the services own validation and
//! ownership scoping and delegate persistence to `SeaOrmStorage`.

mod auth_service;
mod bookmark_service;
pub mod identity;
pub mod short_code;
mod url_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use bookmark_service::BookmarkService;
pub use identity::{GoogleIdentityVerifier, IdentityVerifier};
pub use short_code::{CodeGenerator, ShortCodeAllocator};
pub use url_service::UrlService;
