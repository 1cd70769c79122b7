/// Configuration management for Post Service
///
/// Configuration is read from environment variables (after `.env` is loaded
/// by the binary). Every value has a development default except the S3
/// bucket, which `s3_utils::S3Config` requires when the S3 backend is used.
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default upload cap: 10 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Image storage backend
    pub storage: StorageConfig,
    /// Upload limits
    pub upload: UploadConfig,
    /// Client build served as the SPA fallback
    pub static_files: StaticFilesConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// actix-web worker count
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, `*` for any
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Base URL used by the in-memory backend when building image URLs
    pub memory_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV")
            .or_else(|_| std::env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let port = std::env::var("POST_SERVICE_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|e| format!("Failed to parse port '{}': {}", p, e))
            })
            .transpose()?
            .unwrap_or(3001);

        let allowed_origins =
            std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let backend = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3,
            "memory" => StorageBackend::Memory,
            other => return Err(format!("Unknown STORAGE_BACKEND '{}'", other)),
        };

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("POST_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
                workers: parse_env_or_default("POST_SERVICE_WORKERS", 4)?,
            },
            cors: CorsConfig { allowed_origins },
            storage: StorageConfig {
                backend,
                memory_base_url: std::env::var("MEMORY_STORAGE_BASE_URL")
                    .unwrap_or_else(|_| format!("http://localhost:{}/uploads", port)),
            },
            upload: UploadConfig {
                max_bytes: parse_env_or_default("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            },
            static_files: StaticFilesConfig {
                dir: std::env::var("STATIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("client/build")),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        Err(_) => Ok(default),
    }
}
