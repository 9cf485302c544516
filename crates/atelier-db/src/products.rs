//! Database operations for the `products` table.

use atelier_core::{NewProduct, ProductUpdate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub images: Vec<String>,
    pub is_special: bool,
    pub special_price: Option<Decimal>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns all products, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products(pool: &PgPool) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, description, price, category, stock, images, \
                is_special, special_price, is_featured, created_at, updated_at \
         FROM products \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches a single product by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_product(pool: &PgPool, id: Uuid) -> Result<ProductRow, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, name, description, price, category, stock, images, \
                is_special, special_price, is_featured, created_at, updated_at \
         FROM products \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Creates a new product row and returns the full inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails (including check-constraint
/// violations on price/stock).
pub async fn insert_product(pool: &PgPool, new: &NewProduct) -> Result<ProductRow, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "INSERT INTO products \
           (name, description, price, category, stock, images, is_special, \
            special_price, is_featured) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id, name, description, price, category, stock, images, \
                   is_special, special_price, is_featured, created_at, updated_at",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.price)
    .bind(&new.category)
    .bind(new.stock)
    .bind(&new.images)
    .bind(new.is_special)
    .bind(new.special_price)
    .bind(new.is_featured)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Applies a sparse update to an existing product.
///
/// Non-nullable fields overlay via `COALESCE`: `Some(v)` sets the value,
/// `None` preserves the existing one. For the nullable columns
/// (`description`, `special_price`) a supplied-flag distinguishes "keep"
/// from "set to NULL", in a single `UPDATE … RETURNING` statement.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_product(
    pool: &PgPool,
    id: Uuid,
    update: &ProductUpdate,
) -> Result<ProductRow, DbError> {
    let description_supplied = update.description.is_some();
    let description_val = update.description.clone().flatten();
    let special_price_supplied = update.special_price.is_some();
    let special_price_val = update.special_price.flatten();

    let row = sqlx::query_as::<_, ProductRow>(
        "UPDATE products \
         SET name          = COALESCE($2, name), \
             price         = COALESCE($3, price), \
             category      = COALESCE($4, category), \
             stock         = COALESCE($5, stock), \
             images        = COALESCE($6, images), \
             is_special    = COALESCE($7, is_special), \
             is_featured   = COALESCE($8, is_featured), \
             description   = CASE WHEN $9::BOOL  THEN $10 ELSE description END, \
             special_price = CASE WHEN $11::BOOL THEN $12 ELSE special_price END, \
             updated_at    = NOW() \
         WHERE id = $1 \
         RETURNING id, name, description, price, category, stock, images, \
                   is_special, special_price, is_featured, created_at, updated_at",
    )
    .bind(id)
    .bind(&update.name)
    .bind(update.price)
    .bind(&update.category)
    .bind(update.stock)
    .bind(&update.images)
    .bind(update.is_special)
    .bind(update.is_featured)
    .bind(description_supplied)
    .bind(description_val)
    .bind(special_price_supplied)
    .bind(special_price_val)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Deletes a product; its options and reviews cascade.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the delete fails.
pub async fn delete_product(pool: &PgPool, id: Uuid) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}
