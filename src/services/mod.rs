pub mod photos;
pub mod posts;
pub mod tags;
pub mod tokens;
pub mod users;

pub use photos::PhotoStore;
pub use posts::PostService;
pub use tags::{extract_tags, persist_tags};
pub use tokens::issue_auth_token;
pub use users::UserService;
