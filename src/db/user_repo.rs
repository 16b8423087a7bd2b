/// User repository - handles all database operations for users
use crate::models::User;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new user. The auth token must already be issued by the caller.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    username: Option<&str>,
    full_name: Option<&str>,
    private: bool,
    auth_token: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, username, full_name, private, auth_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, email, username, full_name, private, auth_token, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.to_lowercase())
    .bind(username)
    .bind(full_name)
    .bind(private)
    .bind(auth_token)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, full_name, private, auth_token, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Find a user by auth token. The token is unique, so at most one row matches.
pub async fn find_by_auth_token(pool: &PgPool, token: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, full_name, private, auth_token, created_at, updated_at
        FROM users
        WHERE auth_token = $1
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Check whether an auth token is already assigned to any user
pub async fn auth_token_exists(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE auth_token = $1)")
        .bind(token)
        .fetch_one(pool)
        .await
}

/// Update a user's mutable profile fields. The auth token is never touched.
pub async fn update_user(
    pool: &PgPool,
    id: Uuid,
    email: Option<&str>,
    username: Option<&str>,
    full_name: Option<&str>,
    private: Option<bool>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            username = COALESCE($3, username),
            full_name = COALESCE($4, full_name),
            private = COALESCE($5, private),
            updated_at = $6
        WHERE id = $1
        RETURNING id, email, username, full_name, private, auth_token, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(email.map(|e| e.to_lowercase()))
    .bind(username)
    .bind(full_name)
    .bind(private)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
}

/// Delete a user row
pub async fn delete_user(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Search users by case-insensitive substring of username or full name
pub async fn search_users(
    pool: &PgPool,
    query: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = format!("%{}%", query);

    sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, full_name, private, auth_token, created_at, updated_at
        FROM users
        WHERE username ILIKE $1 OR full_name ILIKE $1
        ORDER BY created_at ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
