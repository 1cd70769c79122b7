/// HTTP handlers
///
/// - Posts: feed listing, creation with image upload, like toggling
/// - Comments: appending comments to a post
/// - Users: profile with authored posts
/// - Health and the client build fallback
pub mod comments;
pub mod health;
pub mod posts;
pub mod static_files;
pub mod users;

pub use comments::add_comment;
pub use health::health_check;
pub use posts::{create_post, list_posts, toggle_like};
pub use static_files::{serve_upload, spa_fallback, StaticFiles};
pub use users::get_user_profile;
