use std::sync::Arc;

use crate::config::UploadConfig;
use crate::db::{PostStore, UserStore};
use crate::services::{ObjectStorage, PostService, UserService};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub users: UserService,
    pub upload: UploadConfig,
}

impl AppState {
    pub fn new(
        post_store: Arc<dyn PostStore>,
        user_store: Arc<dyn UserStore>,
        storage: Arc<dyn ObjectStorage>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            posts: PostService::new(post_store.clone(), storage, upload.max_bytes),
            users: UserService::new(user_store, post_store),
            upload,
        }
    }
}
