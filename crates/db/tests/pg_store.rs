//! PostgreSQL-backed store tests. Each test gets a fresh migrated database;
//! run with `DATABASE_URL` set and `--ignored`.

use assert_matches::assert_matches;
use clientdesk_core::status::{ClientStatus, ProjectStatus};
use clientdesk_db::models::client::NewClient;
use clientdesk_db::models::project::NewProject;
use clientdesk_db::{overview, PgStore, Store, StoreError};
use sqlx::PgPool;

fn new_client(email: &str, phone: &str) -> NewClient {
    NewClient {
        name: "Acme".to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        website: None,
        status: ClientStatus::Active,
        notes: None,
    }
}

fn new_project(budget: f64, currency: &str) -> NewProject {
    NewProject {
        name: "Site".to_string(),
        description: None,
        budget: Some(budget),
        currency: currency.to_string(),
        status: ProjectStatus::NonCompleted,
        start_date: None,
        end_date: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_migrations_and_health(pool: PgPool) {
    clientdesk_db::health_check(&pool).await.unwrap();
    for table in ["clients", "projects", "tasks", "team_members"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_classified(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_client(&new_client("a@x.test", "1")).await.unwrap();

    let err = store
        .create_client(&new_client("a@x.test", "2"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation { field } if field == "email");

    let err = store
        .create_client(&new_client("b@x.test", "1"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::UniqueViolation { field } if field == "phone");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_archive_hides_rows_and_frees_email(pool: PgPool) {
    let store = PgStore::new(pool);
    let a = store.create_client(&new_client("a@x.test", "1")).await.unwrap();
    let b = store.create_client(&new_client("b@x.test", "2")).await.unwrap();

    assert_eq!(store.archive_clients(&[a.id, b.id]).await.unwrap(), 2);
    assert!(store.list_clients().await.unwrap().is_empty());
    assert!(store.find_client(a.id).await.unwrap().is_none());
    assert!(store.update_client(a.id, &new_client("a@x.test", "1")).await.unwrap().is_none());

    store.create_client(&new_client("a@x.test", "1")).await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_clients_with_stats(pool: PgPool) {
    let store = PgStore::new(pool);
    let client = store.create_client(&new_client("a@x.test", "1")).await.unwrap();
    store.create_project(client.id, &new_project(100.0, "USD")).await.unwrap();
    store.create_project(client.id, &new_project(50.0, "USD")).await.unwrap();
    store.create_project(client.id, &new_project(1000.0, "EUR")).await.unwrap();

    let rows = overview::clients_with_stats(&store).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].stats.projects_count, 3);
    assert_eq!(rows[0].stats.primary_currency, "USD");
    assert_eq!(rows[0].stats.total_budget, 150.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_tables_follow_schema_conventions(pool: PgPool) {
    let columns: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT table_name, column_name, data_type
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND table_name != '_sqlx_migrations'
           AND column_name IN ('id', 'created_at', 'updated_at', 'archived_at')",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for table in ["clients", "projects", "tasks", "team_members"] {
        let of_table: Vec<_> = columns.iter().filter(|(t, _, _)| t == table).collect();
        assert_eq!(of_table.len(), 4, "{table} is missing a conventional column");
        for (_, column, data_type) in of_table {
            let expected = if column == "id" { "bigint" } else { "timestamp with time zone" };
            assert_eq!(data_type, expected, "{table}.{column}");
        }
    }
}
