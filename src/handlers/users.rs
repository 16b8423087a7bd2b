/// User handlers - HTTP endpoints for account operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::User;
use crate::services::users::{RegisterParams, UpdateParams};
use crate::services::UserService;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user: RegisterParams,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user: UpdateParams,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// Public profile representation; never exposes the auth token
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub private: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            private: u.private,
            created_at: u.created_at,
        }
    }
}

/// Owner-facing representation, returned on signup and self-info so the
/// client can capture its bearer credential
#[derive(Debug, Serialize)]
pub struct OwnedUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub auth_token: String,
}

impl From<&User> for OwnedUserResponse {
    fn from(u: &User) -> Self {
        Self {
            user: UserResponse::from(u),
            auth_token: u.auth_token.clone(),
        }
    }
}

/// POST /api/v1/users
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.register(req.into_inner().user).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "user": OwnedUserResponse::from(&user),
    })))
}

/// GET /api/v1/users/self
pub async fn get_self(pool: web::Data<PgPool>, user_id: UserId) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service
        .find(user_id.0)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": OwnedUserResponse::from(&user),
    })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    match service.find(*path).await? {
        Some(user) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "user": UserResponse::from(&user),
        }))),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// PUT/PATCH /api/v1/users/{id}
pub async fn update_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service
        .update(*path, user_id.0, req.into_inner().user)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserResponse::from(&user),
    })))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    service.delete(*path, user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/v1/users/search?query=
pub async fn search_users(
    pool: web::Data<PgPool>,
    _requester: UserId,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let users = service
        .search(&params.query, params.limit, params.offset)
        .await?;

    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "users": users })))
}
