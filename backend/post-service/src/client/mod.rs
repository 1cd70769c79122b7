/// Client side of the API: HTTP calls, feed state and the local session
///
/// The browser client only renders what these pieces produce; nothing here
/// depends on a view layer.
pub mod api;
pub mod feed;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use feed::{FeedAction, FeedState};
pub use session::{CurrentUser, SessionFile};
