pub mod access_log;
pub mod auth;
pub mod request_id;

pub use access_log::AccessLog;
pub use auth::{CurrentUser, OptionalUser};
pub use request_id::{RequestId, RequestIdMiddleware};
