//! Auth token issuance
//!
//! Every account carries an opaque bearer token generated once before first
//! persistence and never regenerated afterward.

use crate::db::user_repo;
use crate::error::{AppError, Result};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::PgPool;

const TOKEN_LENGTH: usize = 24;
const MAX_ATTEMPTS: usize = 5;

/// Generate a random alphanumeric token
pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Issue a token guaranteed not to collide with any existing user.
///
/// Regenerates on collision up to a small bound; the unique constraint on
/// users.auth_token is the backstop for the remaining race window between
/// the check and the insert.
pub async fn issue_auth_token(pool: &PgPool) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let token = generate_token();
        if !user_repo::auth_token_exists(pool, &token).await? {
            return Ok(token);
        }
        tracing::warn!("auth token collision, regenerating");
    }

    Err(AppError::Internal(
        "failed to generate a unique auth token".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
