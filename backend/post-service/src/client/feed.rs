use crate::models::{Comment, Post};

/// Server-confirmed changes applied to the local feed
#[derive(Debug, Clone)]
pub enum FeedAction {
    /// Initial fetch completed
    Loaded(Vec<Post>),
    PostCreated(Post),
    /// Like toggle answered with the whole post
    PostUpdated(Post),
    CommentAdded { post_id: String, comment: Comment },
}

/// Local copy of the feed. Entities are keyed by id; a server response
/// always replaces the local version.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedState {
    pub posts: Vec<Post>,
    pub loading: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            loading: true,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reducer: consume the state and return the next one
    pub fn reduce(mut self, action: FeedAction) -> Self {
        match action {
            FeedAction::Loaded(posts) => {
                self.posts = posts;
                self.loading = false;
            }
            FeedAction::PostCreated(post) => {
                self.posts.retain(|p| p.id != post.id);
                self.posts.insert(0, post);
            }
            FeedAction::PostUpdated(post) => {
                if let Some(slot) = self.posts.iter_mut().find(|p| p.id == post.id) {
                    *slot = post;
                }
            }
            FeedAction::CommentAdded { post_id, comment } => {
                if let Some(post) = self.posts.iter_mut().find(|p| p.id == post_id) {
                    post.comments.push(comment);
                }
            }
        }
        self
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}
