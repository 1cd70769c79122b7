/// User profile lookups
use std::sync::Arc;

use crate::db::{PostStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::UserProfile;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { users, posts }
    }

    /// A known user with the posts whose author matches the username
    pub async fn get_profile(&self, username: &str) -> Result<UserProfile> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let posts = self.posts.list_by_author(&user.username).await?;

        Ok(UserProfile {
            user,
            post_count: posts.len(),
            posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;
    use crate::models::Post;
    use chrono::Utc;

    #[tokio::test]
    async fn profile_collects_authored_posts() {
        let store = Arc::new(InMemoryStore::seeded());
        store
            .insert(Post::new("demo_user", "https://img/2", None, Utc::now()))
            .await
            .unwrap();
        store
            .insert(Post::new("alice", "https://img/3", None, Utc::now()))
            .await
            .unwrap();

        let service = UserService::new(store.clone(), store);
        let profile = service.get_profile("demo_user").await.unwrap();

        assert_eq!(profile.post_count, 2);
        assert!(profile.posts.iter().all(|p| p.username == "demo_user"));
        assert_eq!(profile.posts[0].image_url, "https://img/2");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(InMemoryStore::seeded());
        let service = UserService::new(store.clone(), store);

        let err = service.get_profile("alice").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }
}
