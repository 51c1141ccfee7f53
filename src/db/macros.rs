//! Player macro storage

use sqlx::sqlite::SqlitePool;
use tracing::debug;

/// Reads and writes the `player_macros` table
#[derive(Clone)]
pub struct MacroStore {
    pool: SqlitePool,
}

impl MacroStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the stored command for a macro
    pub async fn get_macro(&self, user_id: &str, name: &str) -> sqlx::Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM player_macros WHERE user_id = ? AND macro = ?")
                .bind(user_id)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(value,)| value))
    }

    /// Store or replace a macro
    pub async fn set_macro(&self, user_id: &str, name: &str, body: &str) -> sqlx::Result<()> {
        sqlx::query(
            "INSERT INTO player_macros (user_id, macro, value, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(user_id, macro) DO UPDATE SET value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(user_id)
        .bind(name)
        .bind(body)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        debug!("Set macro {} for {}", name, user_id);
        Ok(())
    }
}
