/// Business logic layer
pub mod comments;
pub mod feed;
pub mod follow;
pub mod likes;
pub mod pagination;
pub mod posts;

pub use comments::CommentService;
pub use feed::{FeedFilter, FeedPage, FeedService};
pub use follow::FollowService;
pub use likes::LikeService;
pub use pagination::PageInfo;
pub use posts::{EditOutcome, PostService};
