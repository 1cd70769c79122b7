/// Storage layer for posts and users
///
/// Handlers and services only see the `PostStore` / `UserStore` traits, so
/// the in-memory implementation can be swapped for a persistent one
/// without touching request handling.
use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, Post, User};

pub mod memory;

pub use memory::InMemoryStore;

/// A change applied to a single post as one atomic step
#[derive(Debug, Clone)]
pub enum PostMutation {
    ToggleLike { username: String },
    AppendComment(Comment),
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest first
    async fn list(&self) -> Result<Vec<Post>>;

    /// Insert a new post; the store may adjust its timestamp to keep
    /// creation order strict. Returns the post as stored.
    async fn insert(&self, post: Post) -> Result<Post>;

    async fn get(&self, id: &str) -> Result<Option<Post>>;

    /// Apply `mutation` to the post with `id`. `None` when no such post.
    async fn update(&self, id: &str, mutation: PostMutation) -> Result<Option<Post>>;

    /// Posts authored by `username`, newest first
    async fn list_by_author(&self, username: &str) -> Result<Vec<Post>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
