use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;

use crate::config::Config;
use crate::error::DbResult;

mod clients;
mod phones;

const DROP_TABLES: [&str; 2] = [
    "DROP TABLE IF EXISTS phone_numbers",
    "DROP TABLE IF EXISTS clients_info",
];

const CREATE_CLIENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS clients_info (
        id SERIAL PRIMARY KEY,
        first_name VARCHAR(60) NOT NULL,
        last_name VARCHAR(60) NOT NULL,
        email VARCHAR(60) NOT NULL UNIQUE
    )
"#;

const CREATE_PHONES: &str = r#"
    CREATE TABLE IF NOT EXISTS phone_numbers (
        id SERIAL PRIMARY KEY,
        phone_number VARCHAR(20),
        client_id INTEGER NOT NULL REFERENCES clients_info(id)
    )
"#;

/// Database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new Database instance with a connection pool
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect(config.database_url())
            .await?;

        Ok(Self { pool })
    }

    /// Wrap an already open pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Drop both tables if present and create them again, empty.
    pub async fn create_db(&self) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        // Phones reference clients, so they go first
        for statement in DROP_TABLES {
            sqlx::query(statement).execute(&mut *tx).await?;
        }

        sqlx::query(CREATE_CLIENTS).execute(&mut *tx).await?;
        sqlx::query(CREATE_PHONES).execute(&mut *tx).await?;

        tx.commit().await?;
        info!("created tables clients_info and phone_numbers");

        Ok(())
    }

    pub(crate) async fn client_exists(
        tx: &mut Transaction<'_, Postgres>,
        client_id: i32,
    ) -> DbResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM clients_info WHERE id = $1)",
        )
        .bind(client_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(exists)
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config).await?;
    info!(max_connections = config.max_connections, "database connection established");

    Ok(db)
}
