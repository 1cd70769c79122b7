/// Business logic layer
pub mod posts;
pub mod uploads;
pub mod users;

pub use posts::{NewPost, PostService};
pub use uploads::{
    ImageUpload, MemoryObjectStorage, ObjectStorage, S3ObjectStorage, StoredObject,
};
pub use users::UserService;
