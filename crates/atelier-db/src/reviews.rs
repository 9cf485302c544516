//! Database operations for the `reviews` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `reviews` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub author: String,
    pub comment: Option<String>,
    /// 1..=5; enforced by a CHECK constraint and by atelier-core at write time.
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Returns every review, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reviews(pool: &PgPool) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, product_id, author, comment, rating, created_at \
         FROM reviews \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns one product's reviews, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reviews_for_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<ReviewRow>, DbError> {
    let rows = sqlx::query_as::<_, ReviewRow>(
        "SELECT id, product_id, author, comment, rating, created_at \
         FROM reviews \
         WHERE product_id = $1 \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Stores a visitor review and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including the CHECK
/// constraint on `rating`).
pub async fn insert_review(
    pool: &PgPool,
    product_id: Uuid,
    author: &str,
    comment: Option<&str>,
    rating: i16,
) -> Result<ReviewRow, DbError> {
    let row = sqlx::query_as::<_, ReviewRow>(
        "INSERT INTO reviews (product_id, author, comment, rating) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, product_id, author, comment, rating, created_at",
    )
    .bind(product_id)
    .bind(author)
    .bind(comment)
    .bind(rating)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
