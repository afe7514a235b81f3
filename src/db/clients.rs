use tracing::{debug, info, warn};

use super::Database;
use crate::error::{DbError, DbResult, Outcome};
use crate::models::{Client, ClientChanges, ClientFilter, ClientRecord};

impl Database {
    /// Insert a client together with its phone numbers and return the new id.
    pub async fn add_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phones: &[&str],
    ) -> DbResult<i32> {
        let mut tx = self.pool.begin().await?;

        let client_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO clients_info (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from_write(e, Some(email)))?;

        for phone in phones {
            sqlx::query("INSERT INTO phone_numbers (phone_number, client_id) VALUES ($1, $2)")
                .bind(*phone)
                .bind(client_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        info!(client_id, phones = phones.len(), "added client");

        Ok(client_id)
    }

    /// Overwrite the columns set in `changes`, then swap `old_phone` for
    /// `new_phone` when both are given. Unknown ids are left as a no-op.
    pub async fn change_client(
        &self,
        client_id: i32,
        changes: &ClientChanges,
        old_phone: Option<&str>,
        new_phone: Option<&str>,
    ) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for (column, value) in changes.columns() {
            // column names come from a fixed list in ClientChanges
            let statement = format!("UPDATE clients_info SET {column} = $1 WHERE id = $2");
            let result = sqlx::query(&statement)
                .bind(value)
                .bind(client_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::from_write(e, (column == "email").then_some(value)))?;
            debug!(client_id, column, rows = result.rows_affected(), "updated client column");
        }

        if let (Some(old_phone), Some(new_phone)) = (old_phone, new_phone) {
            let result = sqlx::query(
                r#"
                UPDATE phone_numbers
                SET phone_number = $1
                WHERE client_id = $2 AND phone_number = $3
                "#,
            )
            .bind(new_phone)
            .bind(client_id)
            .bind(old_phone)
            .execute(&mut *tx)
            .await?;
            debug!(client_id, rows = result.rows_affected(), "replaced phone number");
        }

        tx.commit().await?;
        info!(client_id, "changed client");

        Ok(())
    }

    /// Delete a client and, before it, all of its phone numbers.
    pub async fn delete_client(&self, client_id: i32) -> DbResult<Outcome> {
        let mut tx = self.pool.begin().await?;

        if !Self::client_exists(&mut tx, client_id).await? {
            warn!(client_id, "cannot delete client: no such client");
            return Ok(Outcome::ClientNotFound(client_id));
        }

        let phones = sqlx::query("DELETE FROM phone_numbers WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM clients_info WHERE id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(client_id, phones = phones.rows_affected(), "deleted client");

        Ok(Outcome::Applied)
    }

    /// All client/phone pairs matching every field set in `filter`.
    /// Clients without any phone row never match.
    pub async fn find_client(&self, filter: &ClientFilter) -> DbResult<Vec<ClientRecord>> {
        let records = sqlx::query_as::<_, ClientRecord>(
            r#"
            SELECT c.id, c.first_name, c.last_name, c.email, p.phone_number
            FROM clients_info c
            JOIN phone_numbers p ON p.client_id = c.id
            WHERE ($1::text IS NULL OR c.first_name = $1)
              AND ($2::text IS NULL OR c.last_name = $2)
              AND ($3::text IS NULL OR c.email = $3)
              AND ($4::text IS NULL OR p.phone_number = $4)
            ORDER BY c.id, p.id
            "#,
        )
        .bind(filter.first_name.as_deref())
        .bind(filter.last_name.as_deref())
        .bind(filter.email.as_deref())
        .bind(filter.phone.as_deref())
        .fetch_all(self.get_pool())
        .await?;

        debug!(rows = records.len(), wildcard = filter.is_wildcard(), "found clients");

        Ok(records)
    }

    pub async fn get_client(&self, client_id: i32) -> DbResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email FROM clients_info WHERE id = $1",
        )
        .bind(client_id)
        .fetch_optional(self.get_pool())
        .await?;

        Ok(client)
    }
}
