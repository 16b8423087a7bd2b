/// Like handlers
use crate::db::like_repo;
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::{PhotoStore, PostService};
use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub post_id: Uuid,
    pub like_count: i64,
    pub likers: Vec<Uuid>,
}

/// POST /api/v1/posts/{post_id}/like
pub async fn like_post(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone(), (**photos).clone());
    service.like_post(*path, user_id.0).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "post_id": *path,
        "liked": true,
    })))
}

/// DELETE /api/v1/posts/{post_id}/like
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone(), (**photos).clone());
    let removed = service.unlike_post(*path, user_id.0).await?;

    if removed {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// GET /api/v1/posts/{post_id}/likes
pub async fn get_post_likes(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let post_id = *path;
    let like_count = like_repo::count_likes_by_post(&pool, post_id).await?;
    let likers = like_repo::get_post_likers(&pool, post_id, query.limit, query.offset)
        .await?
        .into_iter()
        .map(|like| like.user_id)
        .collect();

    Ok(HttpResponse::Ok().json(LikeStatusResponse {
        post_id,
        like_count,
        likers,
    }))
}
