//! Repository for the `clients` table.

use clientdesk_core::status::ClientStatus;
use clientdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, NewClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, email, phone, website, status, notes, created_at, updated_at, archived_at";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone, website, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(input.status.as_str())
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a client by ID. Excludes archived rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND archived_at IS NULL");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all clients, most recently created first. Excludes archived rows.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE archived_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Replace every editable field of a client.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = $2,
                email = $3,
                phone = $4,
                website = $5,
                status = $6,
                notes = $7,
                updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(input.status.as_str())
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Set the status of a live client.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ClientStatus,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET status = $2, updated_at = NOW()
             WHERE id = $1 AND archived_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Archive every live client in `ids` with one statement. Returns the
    /// number of rows archived.
    pub async fn archive_many(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE clients SET archived_at = NOW(), updated_at = NOW()
             WHERE id = ANY($1) AND archived_at IS NULL",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
