//! Database operations for `product_fabrics`, `product_colors`, and
//! `product_sizes`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `product_fabrics` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FabricRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    /// Swatch image URL, if one was uploaded.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `product_colors` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ColorRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    /// `#RRGGBB`; the schema enforces the shape with a CHECK constraint.
    pub code: String,
    pub created_at: DateTime<Utc>,
}

/// A row from the `product_sizes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SizeRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// product_fabrics operations
// ---------------------------------------------------------------------------

/// Returns every fabric row, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_fabrics(pool: &PgPool) -> Result<Vec<FabricRow>, DbError> {
    let rows = sqlx::query_as::<_, FabricRow>(
        "SELECT id, product_id, name, image, created_at \
         FROM product_fabrics \
         ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the fabrics configured on one product, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_fabrics_for_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<FabricRow>, DbError> {
    let rows = sqlx::query_as::<_, FabricRow>(
        "SELECT id, product_id, name, image, created_at \
         FROM product_fabrics \
         WHERE product_id = $1 \
         ORDER BY created_at, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Attaches a fabric to a product and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_fabric(
    pool: &PgPool,
    product_id: Uuid,
    name: &str,
    image: Option<&str>,
) -> Result<FabricRow, DbError> {
    let row = sqlx::query_as::<_, FabricRow>(
        "INSERT INTO product_fabrics (product_id, name, image) \
         VALUES ($1, $2, $3) \
         RETURNING id, product_id, name, image, created_at",
    )
    .bind(product_id)
    .bind(name)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Deletes one fabric by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_fabric(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM product_fabrics WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// product_colors operations
// ---------------------------------------------------------------------------

/// Returns every color row, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_colors(pool: &PgPool) -> Result<Vec<ColorRow>, DbError> {
    let rows = sqlx::query_as::<_, ColorRow>(
        "SELECT id, product_id, name, code, created_at \
         FROM product_colors \
         ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the colors configured on one product, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_colors_for_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<ColorRow>, DbError> {
    let rows = sqlx::query_as::<_, ColorRow>(
        "SELECT id, product_id, name, code, created_at \
         FROM product_colors \
         WHERE product_id = $1 \
         ORDER BY created_at, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Attaches a color to a product and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including the CHECK
/// constraint on `code`).
pub async fn insert_color(
    pool: &PgPool,
    product_id: Uuid,
    name: &str,
    code: &str,
) -> Result<ColorRow, DbError> {
    let row = sqlx::query_as::<_, ColorRow>(
        "INSERT INTO product_colors (product_id, name, code) \
         VALUES ($1, $2, $3) \
         RETURNING id, product_id, name, code, created_at",
    )
    .bind(product_id)
    .bind(name)
    .bind(code)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Deletes one color by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_color(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM product_colors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// product_sizes operations
// ---------------------------------------------------------------------------

/// Returns every size row, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sizes(pool: &PgPool) -> Result<Vec<SizeRow>, DbError> {
    let rows = sqlx::query_as::<_, SizeRow>(
        "SELECT id, product_id, name, created_at \
         FROM product_sizes \
         ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the sizes configured on one product, in configuration order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sizes_for_product(
    pool: &PgPool,
    product_id: Uuid,
) -> Result<Vec<SizeRow>, DbError> {
    let rows = sqlx::query_as::<_, SizeRow>(
        "SELECT id, product_id, name, created_at \
         FROM product_sizes \
         WHERE product_id = $1 \
         ORDER BY created_at, id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Attaches a size to a product and returns the inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_size(pool: &PgPool, product_id: Uuid, name: &str) -> Result<SizeRow, DbError> {
    let row = sqlx::query_as::<_, SizeRow>(
        "INSERT INTO product_sizes (product_id, name) \
         VALUES ($1, $2) \
         RETURNING id, product_id, name, created_at",
    )
    .bind(product_id)
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Deletes one size by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_size(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM product_sizes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
