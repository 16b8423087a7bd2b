//! Post service - creation pipeline, reads, and deletion
//!
//! Post creation runs an explicit pipeline: validate, store the photo,
//! insert the post row, then persist extracted tags and attach the location.
//! The tag and location steps happen after the insert commits and are not
//! rolled back on failure; a post can exist without its tags.

use crate::db::{comment_repo, like_repo, location_repo, post_repo, tagging_repo};
use crate::error::{AppError, Result};
use crate::models::{Location, Post, TaggableRef};
use crate::services::photos::PhotoStore;
use crate::services::tags;
use crate::validators;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationErrors;

/// Optional venue payload accompanying a post creation request
#[derive(Debug, Clone, Deserialize)]
pub struct LocationParams {
    pub venue_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
}

/// A post together with its presentation state
#[derive(Debug, Clone)]
pub struct PostDetails {
    pub post: Post,
    pub tags: Vec<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub location: Option<Location>,
}

pub struct PostService {
    pool: PgPool,
    photos: PhotoStore,
}

impl PostService {
    pub fn new(pool: PgPool, photos: PhotoStore) -> Self {
        Self { pool, photos }
    }

    /// Create a post: store the photo, insert the row, then run the tag and
    /// location side effects.
    pub async fn create_post(
        &self,
        user_id: Uuid,
        caption: Option<&str>,
        photo: Option<&str>,
        location: Option<LocationParams>,
    ) -> Result<PostDetails> {
        let mut errors = ValidationErrors::new();
        validators::check_presence(&mut errors, "caption", caption);
        validators::check_presence(&mut errors, "photo", photo);
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let caption = caption.unwrap_or_default();
        let photo_key = match self.photos.store_base64(photo.unwrap_or_default()).await {
            Ok(key) => key,
            Err(AppError::BadRequest(_)) => {
                let mut errors = ValidationErrors::new();
                errors.add("photo", validators::invalid_error());
                return Err(errors.into());
            }
            Err(other) => return Err(other),
        };

        let post = post_repo::create_post(&self.pool, user_id, caption, &photo_key).await?;

        // Explicit post-save pipeline steps, in caller-visible order.
        let taggable = TaggableRef::post(post.id);
        tags::persist_tags(&self.pool, taggable, caption).await?;
        let attached = self.attach_location(post.id, location).await?;

        let tags = tagging_repo::get_tags(&self.pool, taggable).await?;

        Ok(PostDetails {
            post,
            tags,
            like_count: 0,
            comment_count: 0,
            location: attached,
        })
    }

    /// Find or create the venue's location row and link the post to it.
    /// Absent params are a successful no-op.
    pub async fn attach_location(
        &self,
        post_id: Uuid,
        params: Option<LocationParams>,
    ) -> Result<Option<Location>> {
        let Some(params) = params else {
            return Ok(None);
        };

        let location = match location_repo::find_by_venue_id(&self.pool, &params.venue_id).await? {
            Some(existing) => existing,
            None => {
                location_repo::create_location(
                    &self.pool,
                    &params.venue_id,
                    params.latitude,
                    params.longitude,
                    params.name.as_deref(),
                )
                .await?
            }
        };

        location_repo::link_post(&self.pool, post_id, location.id).await?;

        Ok(Some(location))
    }

    /// Get a post with its tags, counts, and location
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<PostDetails>> {
        let Some(post) = post_repo::find_post_by_id(&self.pool, post_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.load_details(post).await?))
    }

    /// Get a user's posts, newest first
    pub async fn get_user_posts(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetails>> {
        let posts = post_repo::find_posts_by_user(&self.pool, user_id, limit, offset).await?;
        self.load_details_batch(posts).await
    }

    /// Get the public feed: posts whose owner is not private, newest first
    pub async fn get_public_posts(&self, limit: i64, offset: i64) -> Result<Vec<PostDetails>> {
        let posts = post_repo::find_public_posts(&self.pool, limit, offset).await?;
        self.load_details_batch(posts).await
    }

    /// Get the posts a user has liked, most recently liked first
    pub async fn get_liked_posts(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetails>> {
        let posts = post_repo::find_liked_posts(&self.pool, user_id, limit, offset).await?;
        self.load_details_batch(posts).await
    }

    /// Delete a post owned by the given user
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(post_repo::delete_post(&self.pool, post_id, user_id).await?)
    }

    /// Like a post. A duplicate like surfaces as a conflict.
    pub async fn like_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        match like_repo::create_like(&self.pool, post_id, user_id).await {
            Ok(_) => Ok(()),
            Err(err) => match AppError::from(err) {
                AppError::Conflict(_) => {
                    Err(AppError::Conflict("post already liked".to_string()))
                }
                other => Err(other),
            },
        }
    }

    /// Remove a like from a post
    pub async fn unlike_post(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(like_repo::delete_like(&self.pool, post_id, user_id).await?)
    }

    /// Whether the user has liked the post
    pub async fn liked_by_user(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(like_repo::find_like(&self.pool, post_id, user_id)
            .await?
            .is_some())
    }

    /// Like count, computed on demand (no counter column)
    pub async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        Ok(like_repo::count_likes_by_post(&self.pool, post_id).await?)
    }

    async fn load_details(&self, post: Post) -> Result<PostDetails> {
        let taggable = TaggableRef::post(post.id);
        let tags = tagging_repo::get_tags(&self.pool, taggable).await?;
        let like_count = like_repo::count_likes_by_post(&self.pool, post.id).await?;
        let comment_count = comment_repo::count_comments_by_post(&self.pool, post.id).await?;
        let location = location_repo::find_by_post(&self.pool, post.id).await?;

        Ok(PostDetails {
            post,
            tags,
            like_count,
            comment_count,
            location,
        })
    }

    async fn load_details_batch(&self, posts: Vec<Post>) -> Result<Vec<PostDetails>> {
        let mut details = Vec::with_capacity(posts.len());
        for post in posts {
            details.push(self.load_details(post).await?);
        }
        Ok(details)
    }
}
