//! Helpers for running repository tests against a real PostgreSQL database.
//!
//! Set `TEST_DATABASE_URL` to enable them; tests return early without it.
//! Every test recreates the schema, so they hold [`serial`] for their whole run.

use std::sync::{Mutex, MutexGuard};

use client_contacts::Database;
use sqlx::postgres::PgPoolOptions;

static SCHEMA_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that share the database.
pub fn serial() -> MutexGuard<'static, ()> {
    SCHEMA_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Connect and recreate empty tables, or `None` when no test database is configured.
pub async fn fresh_database() -> Option<Database> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    let db = Database::from_pool(pool);
    db.create_db().await.expect("Failed to create schema");
    Some(db)
}
