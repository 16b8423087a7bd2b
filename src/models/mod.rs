use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub private: bool,
    pub auth_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub caption: String,
    pub photo_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tagging {
    pub id: Uuid,
    pub tag: String,
    pub taggable_kind: String,
    pub taggable_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub venue_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Kinds of entities that can own tagging rows. Stored as an explicit
/// discriminator column rather than a free-form type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggableKind {
    Post,
}

impl TaggableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaggableKind::Post => "post",
        }
    }
}

/// Reference to a taggable entity: kind plus row id.
#[derive(Debug, Clone, Copy)]
pub struct TaggableRef {
    pub kind: TaggableKind,
    pub id: Uuid,
}

impl TaggableRef {
    pub fn post(id: Uuid) -> Self {
        Self {
            kind: TaggableKind::Post,
            id,
        }
    }
}
