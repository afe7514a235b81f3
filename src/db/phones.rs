use tracing::{info, warn};

use super::Database;
use crate::error::{DbError, DbResult, Outcome};
use crate::models::PhoneNumber;

impl Database {
    pub async fn add_phone(&self, client_id: i32, phone: &str) -> DbResult<Outcome> {
        let mut tx = self.pool.begin().await?;

        if !Self::client_exists(&mut tx, client_id).await? {
            warn!(client_id, phone, "cannot add phone: no such client");
            return Ok(Outcome::ClientNotFound(client_id));
        }

        sqlx::query("INSERT INTO phone_numbers (phone_number, client_id) VALUES ($1, $2)")
            .bind(phone)
            .bind(client_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::from_write(e, None))?;

        tx.commit().await?;
        info!(client_id, phone, "added phone");

        Ok(Outcome::Applied)
    }

    /// Remove `phone` from the client. The client is checked before the phone.
    pub async fn delete_phone(&self, client_id: i32, phone: &str) -> DbResult<Outcome> {
        let mut tx = self.pool.begin().await?;

        if !Self::client_exists(&mut tx, client_id).await? {
            warn!(client_id, phone, "cannot delete phone: no such client");
            return Ok(Outcome::ClientNotFound(client_id));
        }

        let result =
            sqlx::query("DELETE FROM phone_numbers WHERE client_id = $1 AND phone_number = $2")
                .bind(client_id)
                .bind(phone)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            warn!(client_id, phone, "cannot delete phone: client has no such number");
            return Ok(Outcome::PhoneNotFound {
                client_id,
                phone: phone.to_string(),
            });
        }

        tx.commit().await?;
        info!(client_id, phone, "deleted phone");

        Ok(Outcome::Applied)
    }

    /// Phone rows of a client, oldest first.
    pub async fn phones_of(&self, client_id: i32) -> DbResult<Vec<PhoneNumber>> {
        let phones = sqlx::query_as::<_, PhoneNumber>(
            r#"
            SELECT id, phone_number, client_id
            FROM phone_numbers
            WHERE client_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(client_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(phones)
    }
}
