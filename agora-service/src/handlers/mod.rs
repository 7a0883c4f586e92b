/// HTTP handlers for agora endpoints
///
/// This module contains handlers for:
/// - Feeds: global (cached), group, author, and followed-authors listings
/// - Posts: create, read, update, delete
/// - Comments: create and list per post
/// - Follows and likes: social graph and engagement writes
/// - Groups and profiles: community surfaces
pub mod admin;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod groups;
pub mod likes;
pub mod posts;
pub mod profiles;

// Re-export handler functions at module level
pub use admin::purge_feed_cache;
pub use comments::{add_comment, get_post_comments};
pub use feed::{following_feed, global_feed, FeedHandlerState};
pub use follows::{follow_profile, unfollow_profile};
pub use groups::{create_group, get_group, list_groups};
pub use likes::toggle_like;
pub use posts::{create_post, delete_post, get_post, update_post};
pub use profiles::get_profile;
