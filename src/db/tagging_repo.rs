use crate::models::{TaggableRef, Tagging};
use sqlx::PgPool;

/// Insert one tagging row linking a tag to a taggable entity.
/// No uniqueness is enforced: repeated extraction for the same entity
/// appends duplicate rows (known limitation).
pub async fn create_tagging(
    pool: &PgPool,
    taggable: TaggableRef,
    tag: &str,
) -> Result<Tagging, sqlx::Error> {
    sqlx::query_as::<_, Tagging>(
        r#"
        INSERT INTO taggings (tag, taggable_kind, taggable_id)
        VALUES ($1, $2, $3)
        RETURNING id, tag, taggable_kind, taggable_id, created_at
        "#,
    )
    .bind(tag)
    .bind(taggable.kind.as_str())
    .bind(taggable.id)
    .fetch_one(pool)
    .await
}

/// Get the tags persisted for a taggable entity, in insertion order
pub async fn get_tags(pool: &PgPool, taggable: TaggableRef) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT tag
        FROM taggings
        WHERE taggable_kind = $1 AND taggable_id = $2
        ORDER BY created_at ASC, tag ASC
        "#,
    )
    .bind(taggable.kind.as_str())
    .bind(taggable.id)
    .fetch_all(pool)
    .await
}
