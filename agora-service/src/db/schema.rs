use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

/// Ensure the agora tables exist.
///
/// Referential integrity lives in the schema, not in callers: deleting a
/// user removes their posts, comments, follows, and likes; deleting a group
/// detaches its posts; deleting a post removes its comments and likes.
/// We lazily create everything at service startup to unblock environments
/// where migrations have not been applied yet (fresh developer machines,
/// CI spins, integration tests).
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    info!("Ensuring agora tables exist");

    for statement in [
        USERS_TABLE,
        GROUPS_TABLE,
        POSTS_TABLE,
        COMMENTS_TABLE,
        FOLLOWS_TABLE,
        POST_LIKES_TABLE,
        POSTS_CREATED_AT_INDEX,
        POSTS_AUTHOR_INDEX,
        POSTS_GROUP_INDEX,
        COMMENTS_POST_INDEX,
        FOLLOWS_AUTHOR_INDEX,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    username TEXT NOT NULL UNIQUE,
    display_name TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const GROUPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS groups (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    group_id UUID REFERENCES groups(id) ON DELETE SET NULL,
    text TEXT NOT NULL,
    image_key TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const COMMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS comments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    post_id UUID NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    text TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const FOLLOWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS follows (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    follower_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT unique_follow UNIQUE (follower_id, author_id)
)
"#;

const POST_LIKES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS post_likes (
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    post_id UUID NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, post_id)
)
"#;

const POSTS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS posts_created_at_idx ON posts (created_at DESC)";

const POSTS_AUTHOR_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS posts_author_id_idx ON posts (author_id)";

const POSTS_GROUP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS posts_group_id_idx ON posts (group_id)";

const COMMENTS_POST_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS comments_post_id_idx ON comments (post_id)";

const FOLLOWS_AUTHOR_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS follows_author_id_idx ON follows (author_id)";
