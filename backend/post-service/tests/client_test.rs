use actix_web::{web, App, HttpServer};
use post_service::client::{ApiClient, ClientError, CurrentUser, FeedAction, FeedState};
use post_service::config::UploadConfig;
use post_service::db::InMemoryStore;
use post_service::handlers::{self, StaticFiles};
use post_service::routes;
use post_service::services::MemoryObjectStorage;
use post_service::AppState;
use std::path::PathBuf;
use std::sync::Arc;

/// Start the service on an ephemeral port, returning its base URL
fn spawn_server() -> (String, actix_web::dev::ServerHandle) {
    let store = Arc::new(InMemoryStore::seeded());
    let storage = Arc::new(MemoryObjectStorage::new("http://localhost/uploads"));
    let state = web::Data::new(AppState::new(
        store.clone(),
        store,
        storage,
        UploadConfig::default(),
    ));
    let static_files = web::Data::new(StaticFiles {
        dir: PathBuf::from("/nonexistent"),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(static_files.clone())
            .configure(routes::configure)
            .default_service(web::to(handlers::spa_fallback))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    (format!("http://{}", addr), handle)
}

#[actix_web::test]
async fn client_round_trip_updates_feed_state() {
    let (base_url, handle) = spawn_server();
    let client = ApiClient::new(base_url);
    let user = CurrentUser::login("alice").unwrap();

    assert!(client.health().await.unwrap());

    let mut feed = FeedState::new().reduce(FeedAction::Loaded(client.list_posts().await.unwrap()));
    assert!(!feed.loading);
    assert_eq!(feed.posts.len(), 1);

    let post = client
        .create_post(
            &user.username,
            Some("first!"),
            "photo.jpg",
            "image/jpeg",
            vec![0xff, 0xd8, 0xff, 0xe0],
        )
        .await
        .unwrap();
    feed = feed.reduce(FeedAction::PostCreated(post.clone()));
    assert_eq!(feed.posts[0].id, post.id);

    let liked = client.toggle_like(&post.id, &user.username).await.unwrap();
    feed = feed.reduce(FeedAction::PostUpdated(liked));
    assert_eq!(feed.post(&post.id).unwrap().likes, 1);

    let comment = client
        .add_comment(&post.id, "bob", "  lovely  ")
        .await
        .unwrap();
    assert_eq!(comment.text, "lovely");
    feed = feed.reduce(FeedAction::CommentAdded {
        post_id: post.id.clone(),
        comment,
    });

    // the reduced local copy matches what the server now lists
    let server_posts = client.list_posts().await.unwrap();
    assert_eq!(feed.posts, server_posts);

    handle.stop(false).await;
}

#[actix_web::test]
async fn client_surfaces_api_errors() {
    let (base_url, handle) = spawn_server();
    let client = ApiClient::new(base_url);

    match client.toggle_like("missing", "alice").await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Post not found");
        }
        other => panic!("expected API error, got {:?}", other),
    }

    match client.user_profile("nobody").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected API error, got {:?}", other),
    }

    let profile = client.user_profile("demo_user").await.unwrap();
    assert_eq!(profile.post_count, 1);

    handle.stop(false).await;
}

#[actix_web::test]
async fn usernames_with_url_delimiters_do_not_resolve_to_other_users() {
    let (base_url, handle) = spawn_server();
    let client = ApiClient::new(base_url);

    for username in ["demo_user#x", "demo_user?tab=1", "demo_user/posts"] {
        match client.user_profile(username).await {
            Err(ClientError::Api { status, .. }) => {
                assert_eq!(status.as_u16(), 404, "{username}")
            }
            other => panic!("expected 404 for {username}, got {:?}", other),
        }
    }

    match client.toggle_like("1#fragment", "alice").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected 404, got {:?}", other),
    }

    let feed = client.list_posts().await.unwrap();
    assert_eq!(feed[0].likes, 0);

    handle.stop(false).await;
}
