pub mod comment_repo;
pub mod like_repo;
pub mod location_repo;
pub mod post_repo;
pub mod tagging_repo;
pub mod user_repo;
