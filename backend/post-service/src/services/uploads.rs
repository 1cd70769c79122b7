/// Image ingestion: upload validation, storage keys and storage backends
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, StorageError};

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// An uploaded image, fully buffered
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// Content type declared by the multipart part, if any
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `body` under `key` and return its public URL
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

pub fn too_large_error(max_bytes: usize) -> AppError {
    const MIB: usize = 1024 * 1024;
    let limit = if max_bytes >= MIB && max_bytes % MIB == 0 {
        format!("{}MB", max_bytes / MIB)
    } else {
        format!("{} bytes", max_bytes)
    };
    AppError::validation(format!("File too large. Maximum size is {}.", limit))
}

fn not_an_image_error() -> AppError {
    AppError::validation("Only image files are allowed!")
}

fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Check the file name and declared content type, returning the content
/// type to store the object with.
pub fn validate_image(file_name: &str, declared: Option<&str>) -> Result<mime::Mime, AppError> {
    let ext = extension(file_name).ok_or_else(not_an_image_error)?;
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(not_an_image_error());
    }

    if let Some(declared) = declared {
        let parsed: mime::Mime = declared.parse().map_err(|_| not_an_image_error())?;
        if parsed.type_() == mime::IMAGE {
            return Ok(parsed);
        }
        if parsed != mime::APPLICATION_OCTET_STREAM {
            return Err(not_an_image_error());
        }
    }

    Ok(match ext.as_str() {
        "png" => mime::IMAGE_PNG,
        "gif" => mime::IMAGE_GIF,
        _ => mime::IMAGE_JPEG,
    })
}

/// Validate a buffered upload against the size cap and type rules
pub fn validate_upload(upload: &ImageUpload, max_bytes: usize) -> Result<mime::Mime, AppError> {
    if upload.bytes.len() > max_bytes {
        return Err(too_large_error(max_bytes));
    }
    if upload.bytes.is_empty() {
        return Err(AppError::validation("No image file provided"));
    }
    validate_image(&upload.file_name, upload.content_type.as_deref())
}

/// `posts/<unix millis>-<uuid>-<file name>`, with the file name reduced
/// to URL-safe characters
pub fn object_key(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "posts/{}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        safe
    )
}

/// S3 backed storage
pub struct S3ObjectStorage {
    operations: s3_utils::S3Operations,
}

impl S3ObjectStorage {
    pub fn new(operations: s3_utils::S3Operations) -> Self {
        Self { operations }
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        Ok(self.operations.upload_file(key, body, content_type).await?)
    }
}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Process-local object storage for development and tests.
/// Objects are served back by the `/uploads/{key}` route.
#[derive(Debug)]
pub struct MemoryObjectStorage {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryObjectStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes: body,
            },
        );
        Ok(format!("{}/{}", self.base_url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: Option<&str>, size: usize) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: content_type.map(str::to_string),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn accepts_known_image_extensions() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif"] {
            assert!(validate_image(name, None).is_ok(), "{name}");
        }
        assert_eq!(validate_image("c.png", None).unwrap(), mime::IMAGE_PNG);
    }

    #[test]
    fn rejects_non_images() {
        assert!(validate_image("notes.txt", None).is_err());
        assert!(validate_image("noext", None).is_err());
        assert!(validate_image("photo.png", Some("text/plain")).is_err());
        assert!(validate_image("photo.png", Some("application/octet-stream")).is_ok());
        assert!(validate_image("photo.jpg", Some("image/jpeg")).is_ok());
    }

    #[test]
    fn enforces_size_cap() {
        let max = 10 * 1024 * 1024;
        assert!(validate_upload(&upload("a.png", None, max), max).is_ok());

        let err = validate_upload(&upload("a.png", None, max + 1), max).unwrap_err();
        assert_eq!(err.to_string(), "File too large. Maximum size is 10MB.");
    }

    #[test]
    fn object_key_layout() {
        let key = object_key("my photo.png");
        assert!(key.starts_with("posts/"));
        assert!(key.ends_with("-my_photo.png"));

        let rest = key.trim_start_matches("posts/");
        let (millis, _) = rest.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn object_key_drops_client_paths() {
        let key = object_key("C:\\Users\\me\\cat.gif");
        assert!(key.ends_with("-cat.gif"));
    }

    #[tokio::test]
    async fn memory_storage_round_trip() {
        let storage = MemoryObjectStorage::new("http://localhost:3001/uploads/");
        let url = storage
            .put_object("posts/1-a.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3001/uploads/posts/1-a.png");
        let stored = storage.get("posts/1-a.png").await.unwrap();
        assert_eq!(stored.bytes, vec![1, 2, 3]);
        assert_eq!(stored.content_type, "image/png");
    }
}
