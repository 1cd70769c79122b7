use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use super::{PostMutation, PostStore, UserStore};
use crate::error::Result;
use crate::models::{Comment, Post, User};

/// Process-local store. Nothing survives a restart.
///
/// Posts are kept newest first. Every mutation holds the write lock for its
/// whole read-modify-write, which serializes the mutating operations across
/// actix workers and keeps `likes == liked_by.len()`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    posts: RwLock<Vec<Post>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut posts: Vec<Post>, users: Vec<User>) -> Self {
        sort_newest_first(&mut posts);
        Self {
            posts: RwLock::new(posts),
            users: RwLock::new(users),
        }
    }

    /// Demo content shown on a fresh start
    pub fn seeded() -> Self {
        let now = Utc::now();
        let post = Post {
            id: "1".to_string(),
            username: "demo_user".to_string(),
            image_url: "https://via.placeholder.com/400x400?text=Demo+Post".to_string(),
            caption: "Welcome to Picfeed! This is a demo post.".to_string(),
            likes: 0,
            liked_by: Vec::new(),
            timestamp: now,
            comments: vec![Comment {
                id: "1".to_string(),
                username: "friend1".to_string(),
                text: "Great app!".to_string(),
                timestamp: now,
            }],
        };
        let user = User {
            id: "1".to_string(),
            username: "demo_user".to_string(),
            email: "demo@example.com".to_string(),
        };

        Self::with_data(vec![post], vec![user])
    }
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    async fn insert(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts.write().await;

        if let Some(newest) = posts.iter().map(|p| p.timestamp).max() {
            if post.timestamp <= newest {
                post.timestamp = newest + Duration::microseconds(1);
            }
        }

        posts.insert(0, post.clone());
        Ok(post)
    }

    async fn get(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: &str, mutation: PostMutation) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        match mutation {
            PostMutation::ToggleLike { username } => {
                post.toggle_like(&username);
            }
            PostMutation::AppendComment(comment) => post.comments.push(comment),
        }

        Ok(Some(post.clone()))
    }

    async fn list_by_author(&self, username: &str) -> Result<Vec<Post>> {
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.username == username)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
