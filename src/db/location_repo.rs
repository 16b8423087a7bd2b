use crate::models::Location;
use sqlx::PgPool;
use uuid::Uuid;

/// Find a location by its external venue identifier.
/// venue_id has no uniqueness constraint; when concurrent creation has
/// produced duplicates, the oldest row wins.
pub async fn find_by_venue_id(
    pool: &PgPool,
    venue_id: &str,
) -> Result<Option<Location>, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        SELECT id, venue_id, latitude, longitude, name, created_at
        FROM locations
        WHERE venue_id = $1
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(venue_id)
    .fetch_optional(pool)
    .await
}

/// Create a new location row for a venue
pub async fn create_location(
    pool: &PgPool,
    venue_id: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    name: Option<&str>,
) -> Result<Location, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        INSERT INTO locations (venue_id, latitude, longitude, name)
        VALUES ($1, $2, $3, $4)
        RETURNING id, venue_id, latitude, longitude, name, created_at
        "#,
    )
    .bind(venue_id)
    .bind(latitude)
    .bind(longitude)
    .bind(name)
    .fetch_one(pool)
    .await
}

/// Link a post to a location, replacing any existing link
pub async fn link_post(pool: &PgPool, post_id: Uuid, location_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_locations (post_id, location_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id) DO UPDATE SET location_id = EXCLUDED.location_id
        "#,
    )
    .bind(post_id)
    .bind(location_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the location linked to a post, if any
pub async fn find_by_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Location>, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        SELECT l.id, l.venue_id, l.latitude, l.longitude, l.name, l.created_at
        FROM locations l
        JOIN post_locations pl ON pl.location_id = l.id
        WHERE pl.post_id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Count total location rows
pub async fn count_locations(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM locations")
        .fetch_one(pool)
        .await
}
