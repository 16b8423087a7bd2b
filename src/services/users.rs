//! User account service - registration, profile updates, search

use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::tokens;
use crate::validators;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

/// Attributes accepted on signup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterParams {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
}

/// Attributes accepted on profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParams {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub private: Option<bool>,
}

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new account. The auth token is issued before the row is
    /// first persisted and never changes afterward.
    pub async fn register(&self, params: RegisterParams) -> Result<User> {
        let mut errors = ValidationErrors::new();
        validators::check_email(&mut errors, params.email.as_deref());
        validators::check_username(&mut errors, params.username.as_deref());
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let auth_token = tokens::issue_auth_token(&self.pool).await?;

        // The unique constraint on auth_token backstops the issue-then-insert
        // race: the losing writer gets a conflict and the caller resubmits.
        let user = user_repo::create_user(
            &self.pool,
            params.email.as_deref().unwrap_or_default(),
            params.username.as_deref(),
            params.full_name.as_deref(),
            params.private.unwrap_or(false),
            &auth_token,
        )
        .await?;

        Ok(user)
    }

    /// Update a user's profile. Only the account owner may update it.
    pub async fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        params: UpdateParams,
    ) -> Result<User> {
        if id != requester_id {
            return Err(AppError::Forbidden(
                "cannot update another user's account".to_string(),
            ));
        }

        let mut errors = ValidationErrors::new();
        if let Some(email) = params.email.as_deref() {
            validators::check_email(&mut errors, Some(email));
        }
        validators::check_username(&mut errors, params.username.as_deref());
        if !errors.is_empty() {
            return Err(errors.into());
        }

        if user_repo::find_by_id(&self.pool, id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        Ok(user_repo::update_user(
            &self.pool,
            id,
            params.email.as_deref(),
            params.username.as_deref(),
            params.full_name.as_deref(),
            params.private,
        )
        .await?)
    }

    /// Delete a user. Only the account owner may delete it.
    pub async fn delete(&self, id: Uuid, requester_id: Uuid) -> Result<()> {
        if id != requester_id {
            return Err(AppError::Forbidden(
                "cannot delete another user's account".to_string(),
            ));
        }

        if !user_repo::delete_user(&self.pool, id).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        Ok(())
    }

    /// Find a user by id
    pub async fn find(&self, id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_by_id(&self.pool, id).await?)
    }

    /// Search users by username or full name substring
    pub async fn search(&self, query: &str, limit: i64, offset: i64) -> Result<Vec<User>> {
        Ok(user_repo::search_users(&self.pool, query, limit, offset).await?)
    }
}
