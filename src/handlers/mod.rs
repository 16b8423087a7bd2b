pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

use actix_web::web;
use serde::Deserialize;

/// Register the versioned API route tree.
///
/// Literal segments (`/users/self`, `/users/search`) are registered before
/// the `/users/{id}` matcher so they are not captured as ids.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::resource("/users")
                    .route(web::post().to(users::create_user)),
            )
            .service(
                web::resource("/users/self").route(web::get().to(users::get_self)),
            )
            .service(
                web::resource("/users/self/liked")
                    .route(web::get().to(posts::get_liked_posts)),
            )
            .service(
                web::resource("/users/search").route(web::get().to(users::search_users)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(users::get_user))
                    .route(web::put().to(users::update_user))
                    .route(web::patch().to(users::update_user))
                    .route(web::delete().to(users::delete_user)),
            )
            .service(
                web::resource("/users/{id}/posts")
                    .route(web::get().to(posts::get_user_posts)),
            )
            .service(
                web::resource("/posts")
                    .route(web::get().to(posts::get_public_posts))
                    .route(web::post().to(posts::create_post)),
            )
            .service(
                web::resource("/posts/{id}")
                    .route(web::get().to(posts::get_post))
                    .route(web::delete().to(posts::delete_post)),
            )
            .service(
                web::resource("/posts/{id}/like")
                    .route(web::post().to(likes::like_post))
                    .route(web::delete().to(likes::unlike_post)),
            )
            .service(
                web::resource("/posts/{id}/likes")
                    .route(web::get().to(likes::get_post_likes)),
            )
            .service(
                web::resource("/posts/{id}/comments")
                    .route(web::post().to(comments::create_comment))
                    .route(web::get().to(comments::get_comments)),
            )
            .service(
                web::resource("/comments/{id}")
                    .route(web::delete().to(comments::delete_comment)),
            ),
    );
}

fn default_limit() -> i64 {
    20
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
