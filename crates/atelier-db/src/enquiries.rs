//! Database operations for the `enquiries` table.

use atelier_core::EnquiryDraft;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `enquiries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnquiryRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub message: String,
    pub fabric: Option<String>,
    pub color: Option<String>,
    /// One of `pending`, `responded`, `completed` (CHECK constraint).
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Persists a validated enquiry draft in `pending` status and returns the
/// inserted row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_enquiry(pool: &PgPool, draft: &EnquiryDraft) -> Result<EnquiryRow, DbError> {
    let row = sqlx::query_as::<_, EnquiryRow>(
        "INSERT INTO enquiries \
           (product_id, product_name, customer_name, customer_email, \
            customer_phone, message, fabric, color, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending') \
         RETURNING id, product_id, product_name, customer_name, customer_email, \
                   customer_phone, message, fabric, color, status, created_at",
    )
    .bind(draft.product_id)
    .bind(&draft.product_name)
    .bind(&draft.customer_name)
    .bind(&draft.customer_email)
    .bind(&draft.customer_phone)
    .bind(&draft.message)
    .bind(&draft.fabric)
    .bind(&draft.color)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns all enquiries, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_enquiries(pool: &PgPool) -> Result<Vec<EnquiryRow>, DbError> {
    let rows = sqlx::query_as::<_, EnquiryRow>(
        "SELECT id, product_id, product_name, customer_name, customer_email, \
                customer_phone, message, fabric, color, status, created_at \
         FROM enquiries \
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Fetches a single enquiry by id.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_enquiry(pool: &PgPool, id: Uuid) -> Result<EnquiryRow, DbError> {
    let row = sqlx::query_as::<_, EnquiryRow>(
        "SELECT id, product_id, product_name, customer_name, customer_email, \
                customer_phone, message, fabric, color, status, created_at \
         FROM enquiries \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Moves an enquiry from `expected_status` to `new_status` with a guarded
/// UPDATE, so a concurrent admin action cannot double-apply a transition.
///
/// # Errors
///
/// Returns [`DbError::InvalidEnquiryTransition`] if the row is no longer in
/// `expected_status`, or [`DbError::Sqlx`] if the update fails.
pub async fn update_enquiry_status(
    pool: &PgPool,
    id: Uuid,
    expected_status: &str,
    new_status: &str,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE enquiries \
         SET status = $1 \
         WHERE id = $2 AND status = $3",
    )
    .bind(new_status)
    .bind(id)
    .bind(expected_status)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidEnquiryTransition {
            id,
            expected_status: expected_status.to_string(),
        });
    }

    Ok(())
}
