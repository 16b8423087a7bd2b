/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::services::posts::{LocationParams, PostDetails};
use crate::services::{PhotoStore, PostService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub post: CreatePostParams,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostParams {
    pub caption: Option<String>,
    /// Base64-encoded photo payload
    pub photo: Option<String>,
    pub location: Option<LocationParams>,
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub venue_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: String,
    pub photo_key: String,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub location: Option<LocationResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&PostDetails> for PostResponse {
    fn from(d: &PostDetails) -> Self {
        Self {
            id: d.post.id,
            user_id: d.post.user_id,
            caption: d.post.caption.clone(),
            photo_key: d.post.photo_key.clone(),
            tags: d.tags.clone(),
            like_count: d.like_count,
            comment_count: d.comment_count,
            location: d.location.as_ref().map(|l| LocationResponse {
                venue_id: l.venue_id.clone(),
                latitude: l.latitude,
                longitude: l.longitude,
                name: l.name.clone(),
            }),
            created_at: d.post.created_at,
        }
    }
}

fn service(pool: &web::Data<PgPool>, photos: &web::Data<PhotoStore>) -> PostService {
    PostService::new(pool.get_ref().clone(), photos.get_ref().clone())
}

/// POST /api/v1/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let params = req.into_inner().post;
    let details = service(&pool, &photos)
        .create_post(
            user_id.0,
            params.caption.as_deref(),
            params.photo.as_deref(),
            params.location,
        )
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "post": PostResponse::from(&details),
    })))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service(&pool, &photos).get_post(*path).await? {
        Some(details) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "post": PostResponse::from(&details),
        }))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// GET /api/v1/posts - the public feed
pub async fn get_public_posts(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let posts = service(&pool, &photos)
        .get_public_posts(query.limit, query.offset)
        .await?;

    let posts: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}

/// GET /api/v1/users/{id}/posts
pub async fn get_user_posts(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let posts = service(&pool, &photos)
        .get_user_posts(*path, query.limit, query.offset)
        .await?;

    let posts: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}

/// GET /api/v1/users/self/liked
pub async fn get_liked_posts(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    user_id: UserId,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let posts = service(&pool, &photos)
        .get_liked_posts(user_id.0, query.limit, query.offset)
        .await?;

    let posts: Vec<PostResponse> = posts.iter().map(PostResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "posts": posts })))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    photos: web::Data<PhotoStore>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let deleted = service(&pool, &photos).delete_post(*path, user_id.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test]
    async fn service_builds_from_shared_app_data() {
        // Handlers hold web::Data by reference; the helper must clone the
        // inner values out of the shared wrappers.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/photogram")
            .unwrap();
        let pool = web::Data::new(pool);
        let photos = web::Data::new(PhotoStore::new("storage/photos"));

        let _ = service(&pool, &photos);
    }
}
