use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::{anyhow, Context};
use post_service::config::{Config, StorageBackend};
use post_service::db::InMemoryStore;
use post_service::handlers::{self, StaticFiles};
use post_service::routes;
use post_service::services::{MemoryObjectStorage, ObjectStorage, S3ObjectStorage};
use post_service::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `post-service healthcheck`: exit non-zero unless `/api/health` answers 2xx
async fn run_healthcheck() -> anyhow::Result<()> {
    let port = std::env::var("POST_SERVICE_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3001".to_string());
    let url = format!("http://127.0.0.1:{}/api/health", port);

    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("healthcheck request to {} failed", url))?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(anyhow!("healthcheck HTTP status: {}", resp.status()))
    }
}

/// Post Service
///
/// Serves the image feed API and the built client.
///
/// # Routes
///
/// - `GET  /api/posts` - all posts, newest first
/// - `POST /api/posts` - multipart upload creating a post
/// - `POST /api/posts/{id}/like` - toggle a like
/// - `POST /api/posts/{id}/comments` - append a comment
/// - `GET  /api/users/{username}` - profile with authored posts
/// - `GET  /api/health` - liveness marker
/// - anything else - client build with `index.html` fallback
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        return run_healthcheck().await;
    }

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    tracing::info!(
        env = %config.app.env,
        storage = ?config.storage.backend,
        static_dir = %config.static_files.dir.display(),
        "Starting post-service"
    );

    let store = Arc::new(InMemoryStore::seeded());

    let memory_storage = match config.storage.backend {
        StorageBackend::Memory => Some(Arc::new(MemoryObjectStorage::new(
            config.storage.memory_base_url.clone(),
        ))),
        StorageBackend::S3 => None,
    };
    let storage: Arc<dyn ObjectStorage> = match &memory_storage {
        Some(memory) => {
            tracing::warn!("Using in-memory image storage; uploads are lost on restart");
            memory.clone() as Arc<dyn ObjectStorage>
        }
        None => {
            let s3 = s3_utils::S3Client::new()
                .await
                .context("Failed to initialize S3 client")?;
            if let Err(e) = s3.health_check().await {
                tracing::warn!(error = %e, "S3 bucket check failed; uploads may fail");
            }
            Arc::new(S3ObjectStorage::new(s3.operations()))
        }
    };

    let state = web::Data::new(AppState::new(
        store.clone(),
        store,
        storage,
        config.upload.clone(),
    ));
    let static_files = web::Data::new(StaticFiles {
        dir: config.static_files.dir.clone(),
    });
    let memory_storage = memory_storage.map(web::Data::new);

    let bind_address = config.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(static_files.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure);

        if let Some(memory) = &memory_storage {
            app = app
                .app_data(memory.clone())
                .configure(routes::configure_uploads);
        }

        app.default_service(web::to(handlers::spa_fallback))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(config.app.workers)
    .run();

    tracing::info!("Post service running on {}", bind_address);

    // actix-web stops gracefully on SIGINT/SIGTERM
    server.await.context("HTTP server failed")?;

    tracing::info!("Post-service shutting down");
    Ok(())
}
