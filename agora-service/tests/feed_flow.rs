//! End-to-end behavior against live PostgreSQL/Redis.
//!
//! These tests exercise the real storage layer and are skipped (with a
//! notice) when `TEST_DATABASE_URL` is not set. The cache tests also
//! require `TEST_REDIS_URL`. Tests run serially: they share one database.

use redis::aio::ConnectionManager;
use serial_test::serial;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use agora_service::cache::FeedCache;
use agora_service::db::{self, comment_repo, follow_repo, group_repo, like_repo, post_repo, user_repo};
use agora_service::error::AppError;
use agora_service::models::User;
use agora_service::services::{
    CommentService, FeedFilter, FeedService, FollowService, LikeService, PostService,
};

async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_DATABASE_URL not set; skipping");
            return None;
        }
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("connect to test database");
    db::ensure_schema(&pool).await.expect("ensure schema");
    Some(pool)
}

async fn test_redis() -> Option<ConnectionManager> {
    let url = match std::env::var("TEST_REDIS_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("TEST_REDIS_URL not set; skipping");
            return None;
        }
    };
    let client = redis::Client::open(url.as_str()).expect("redis url");
    Some(
        ConnectionManager::new(client)
            .await
            .expect("connect to test redis"),
    )
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

async fn seed_user(pool: &PgPool, prefix: &str) -> User {
    user_repo::create_user(pool, &unique(prefix), None)
        .await
        .expect("create user")
}

#[tokio::test]
#[serial]
async fn group_feed_contains_post_exactly_once() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "author").await;
    let g1_slug = unique("g1");
    let g2_slug = unique("g2");
    let g1 = group_repo::create_group(&pool, &g1_slug, "Group One", "").await.unwrap();
    group_repo::create_group(&pool, &g2_slug, "Group Two", "").await.unwrap();

    let posts = PostService::new(pool.clone());
    let post = posts
        .create_post(author.id, "hello", Some(g1.id), None)
        .await
        .unwrap();

    let feed = FeedService::new(pool.clone(), 10);

    let g1_feed = feed
        .get_feed(&FeedFilter::Group(g1_slug.clone()), 1)
        .await
        .unwrap();
    let hits = g1_feed.posts.iter().filter(|p| p.id == post.id).count();
    assert_eq!(hits, 1, "post appears exactly once in its group feed");
    assert_eq!(g1_feed.posts[0].text, "hello");

    let g2_feed = feed
        .get_feed(&FeedFilter::Group(g2_slug), 1)
        .await
        .unwrap();
    assert!(g2_feed.posts.iter().all(|p| p.id != post.id));
    assert!(g2_feed.posts.is_empty());

    let author_feed = feed
        .get_feed(&FeedFilter::Author(author.username.clone()), 1)
        .await
        .unwrap();
    assert_eq!(author_feed.posts.len(), 1);
    assert_eq!(author_feed.posts[0].id, post.id);

    let err = feed
        .get_feed(&FeedFilter::Group(unique("never-created")), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = feed
        .get_feed(&FeedFilter::Author(unique("nobody")), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn feed_ordering_is_newest_first() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "author").await;
    let posts = PostService::new(pool.clone());
    for i in 0..3 {
        posts
            .create_post(author.id, &format!("post {}", i), None, None)
            .await
            .unwrap();
    }

    let feed = FeedService::new(pool.clone(), 10);
    let page = feed
        .get_feed(&FeedFilter::Author(author.username.clone()), 1)
        .await
        .unwrap();

    assert_eq!(page.posts.len(), 3);
    for pair in page.posts.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "feed must be ordered newest first"
        );
    }
}

#[tokio::test]
#[serial]
async fn follow_is_idempotent_and_self_follow_is_a_noop() {
    let Some(pool) = test_pool().await else { return };

    let follower = seed_user(&pool, "follower").await;
    let author = seed_user(&pool, "author").await;
    let service = FollowService::new(pool.clone());

    service.follow(follower.id, author.id).await.unwrap();
    service.follow(follower.id, author.id).await.unwrap();
    assert!(service.is_following(follower.id, author.id).await.unwrap());

    let edges: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND author_id = $2",
    )
    .bind(follower.id)
    .bind(author.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(edges, 1, "double follow leaves exactly one edge");

    service.follow(follower.id, follower.id).await.unwrap();
    assert!(!service.is_following(follower.id, follower.id).await.unwrap());
    let self_edges: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND author_id = $1",
    )
    .bind(follower.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(self_edges, 0, "self-follow never creates an edge");
}

#[tokio::test]
#[serial]
async fn unfollow_of_absent_relation_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let follower = seed_user(&pool, "follower").await;
    let author = seed_user(&pool, "author").await;
    let service = FollowService::new(pool.clone());

    service.follow(follower.id, author.id).await.unwrap();
    service.unfollow(follower.id, author.id).await.unwrap();

    let err = service.unfollow(follower.id, author.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert!(!service.is_following(follower.id, author.id).await.unwrap());
}

#[tokio::test]
#[serial]
async fn like_toggle_is_an_involution() {
    let Some(pool) = test_pool().await else { return };

    let user = seed_user(&pool, "liker").await;
    let author = seed_user(&pool, "author").await;
    let post = PostService::new(pool.clone())
        .create_post(author.id, "likeable", None, None)
        .await
        .unwrap();

    let service = LikeService::new(pool.clone());

    assert!(!like_repo::check_user_liked(&pool, user.id, post.id).await.unwrap());
    service.toggle_like(user.id, post.id).await.unwrap();
    assert!(like_repo::check_user_liked(&pool, user.id, post.id).await.unwrap());
    service.toggle_like(user.id, post.id).await.unwrap();
    assert!(
        !like_repo::check_user_liked(&pool, user.id, post.id).await.unwrap(),
        "two toggles restore the original membership"
    );

    let err = service.toggle_like(user.id, Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn pagination_boundary_with_thirteen_posts() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "prolific").await;
    let posts = PostService::new(pool.clone());
    for i in 0..13 {
        posts
            .create_post(author.id, &format!("post {}", i), None, None)
            .await
            .unwrap();
    }

    let feed = FeedService::new(pool.clone(), 10);
    let filter = FeedFilter::Author(author.username.clone());

    let first = feed.get_feed(&filter, 1).await.unwrap();
    assert_eq!(first.posts.len(), 10);
    assert!(first.page.has_next);
    assert!(!first.page.has_prev);
    assert_eq!(first.page.total_pages, 2);

    let second = feed.get_feed(&filter, 2).await.unwrap();
    assert_eq!(second.posts.len(), 3);
    assert!(!second.page.has_next);
    assert!(second.page.has_prev);

    let third = feed.get_feed(&filter, 3).await.unwrap();
    assert!(third.posts.is_empty(), "pages past the end are empty, not errors");
}

#[tokio::test]
#[serial]
async fn follow_feed_tracks_the_social_graph() {
    let Some(pool) = test_pool().await else { return };

    let reader = seed_user(&pool, "reader").await;
    let stranger = seed_user(&pool, "stranger").await;
    let author = seed_user(&pool, "author").await;

    FollowService::new(pool.clone())
        .follow(reader.id, author.id)
        .await
        .unwrap();
    let post = PostService::new(pool.clone())
        .create_post(author.id, "for my followers", None, None)
        .await
        .unwrap();

    let feed = FeedService::new(pool.clone(), 10);

    let reader_feed = feed
        .get_feed(&FeedFilter::Following(reader.id), 1)
        .await
        .unwrap();
    assert!(reader_feed.posts.iter().any(|p| p.id == post.id));

    let stranger_feed = feed
        .get_feed(&FeedFilter::Following(stranger.id), 1)
        .await
        .unwrap();
    assert!(stranger_feed.posts.iter().all(|p| p.id != post.id));
}

#[tokio::test]
#[serial]
async fn comments_attach_to_posts_and_cascade_with_them() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "author").await;
    let commenter = seed_user(&pool, "commenter").await;
    let post = PostService::new(pool.clone())
        .create_post(author.id, "discuss", None, None)
        .await
        .unwrap();

    let comments = CommentService::new(pool.clone(), 10);
    comments
        .add_comment(post.id, commenter.id, "first!")
        .await
        .unwrap();
    let (listed, page) = comments.get_post_comments(post.id, 1).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(page.total_pages, 1);

    let err = comments
        .add_comment(Uuid::new_v4(), commenter.id, "into the void")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    LikeService::new(pool.clone())
        .toggle_like(commenter.id, post.id)
        .await
        .unwrap();

    // Deleting the post takes comments and likes with it at the storage layer.
    assert!(PostService::new(pool.clone())
        .delete_post(post.id, author.id)
        .await
        .unwrap());
    assert_eq!(comment_repo::count_by_post(&pool, post.id).await.unwrap(), 0);
    assert_eq!(like_repo::count_for_post(&pool, post.id).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn deleting_a_group_detaches_its_posts() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "author").await;
    let group = group_repo::create_group(&pool, &unique("doomed"), "Doomed", "").await.unwrap();
    let post = PostService::new(pool.clone())
        .create_post(author.id, "orphan me", Some(group.id), None)
        .await
        .unwrap();

    sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(group.id)
        .execute(&pool)
        .await
        .unwrap();

    let survivor = post_repo::find_post_by_id(&pool, post.id).await.unwrap().unwrap();
    assert_eq!(survivor.group_id, None, "group deletion clears the reference, not the post");
}

#[tokio::test]
#[serial]
async fn deleting_a_user_cascades_their_content() {
    let Some(pool) = test_pool().await else { return };

    let author = seed_user(&pool, "departing").await;
    let follower = seed_user(&pool, "fan").await;
    let post = PostService::new(pool.clone())
        .create_post(author.id, "soon gone", None, None)
        .await
        .unwrap();
    FollowService::new(pool.clone())
        .follow(follower.id, author.id)
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(author.id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(post_repo::find_post_by_id(&pool, post.id).await.unwrap().is_none());
    assert!(!follow_repo::follow_exists(&pool, follower.id, author.id).await.unwrap());
}

#[tokio::test]
#[serial]
async fn global_feed_cache_is_stale_until_ttl_or_purge() {
    let Some(pool) = test_pool().await else { return };
    let Some(redis) = test_redis().await else { return };

    let author = seed_user(&pool, "author").await;
    let cache = Arc::new(FeedCache::new(redis, 1));
    let feed = FeedService::with_cache(pool.clone(), cache.clone(), 50);
    let posts = PostService::new(pool.clone());

    cache.clear().await.unwrap();

    // Prime the cache, then write behind its back.
    feed.get_feed(&FeedFilter::All, 1).await.unwrap();
    let hidden = posts
        .create_post(author.id, "invisible until expiry", None, None)
        .await
        .unwrap();

    let stale = feed.get_feed(&FeedFilter::All, 1).await.unwrap();
    assert!(
        stale.posts.iter().all(|p| p.id != hidden.id),
        "a read within the TTL window may serve the pre-write feed"
    );

    tokio::time::sleep(Duration::from_millis(1300)).await;
    let fresh = feed.get_feed(&FeedFilter::All, 1).await.unwrap();
    assert!(
        fresh.posts.iter().any(|p| p.id == hidden.id),
        "a read after TTL expiry must include the post"
    );

    // Explicit purge makes a new write visible without waiting.
    let hidden2 = posts
        .create_post(author.id, "invisible until purge", None, None)
        .await
        .unwrap();
    cache.clear().await.unwrap();
    let after_purge = feed.get_feed(&FeedFilter::All, 1).await.unwrap();
    assert!(after_purge.posts.iter().any(|p| p.id == hidden2.id));
}
