/// Comment handlers
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::handlers::PaginationParams;
use crate::middleware::UserId;
use crate::models::Comment;
use crate::validators;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: CreateCommentParams,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentParams {
    pub body: Option<String>,
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let post_id = *path;
    let params = req.into_inner().comment;

    let mut errors = ValidationErrors::new();
    validators::check_presence(&mut errors, "body", params.body.as_deref());
    if !errors.is_empty() {
        return Err(errors.into());
    }

    if post_repo::find_post_by_id(&pool, post_id).await?.is_none() {
        return Err(AppError::NotFound("post not found".to_string()));
    }

    let comment: Comment = comment_repo::create_comment(
        &pool,
        post_id,
        user_id.0,
        params.body.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "comment": comment })))
}

/// GET /api/v1/posts/{post_id}/comments
pub async fn get_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let comments =
        comment_repo::get_comments_by_post(&pool, *path, query.limit, query.offset).await?;
    let total_count = comment_repo::count_comments_by_post(&pool, *path).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "comments": comments,
        "total_count": total_count,
    })))
}

/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let deleted = comment_repo::delete_comment(&pool, *path, user_id.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}
