//! Player stat storage

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use tracing::debug;

use crate::stats::{StatName, StatSnapshot};

/// Reads and writes the `player_stats` table
#[derive(Clone)]
pub struct StatStore {
    pool: SqlitePool,
}

impl StatStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get every recorded stat for a player, or `None` if they have never
    /// set one
    pub async fn get_stats(&self, user_id: &str) -> sqlx::Result<Option<StatSnapshot>> {
        let row = sqlx::query(
            "SELECT strength, dexterity, constitution, intelligence, wisdom, charisma, av, ac, hp
             FROM player_stats WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut snapshot = StatSnapshot::default();
        for stat in StatName::ALL {
            if let Some(value) = row.try_get::<Option<i32>, _>(stat.column())? {
                snapshot.set(stat, value);
            }
        }

        Ok(Some(snapshot))
    }

    /// Get a single stat
    pub async fn get_stat(&self, user_id: &str, stat: StatName) -> sqlx::Result<Option<i32>> {
        Ok(self
            .get_stats(user_id)
            .await?
            .and_then(|snapshot| snapshot.get(stat)))
    }

    /// Record a stat, creating the player's row on first use
    pub async fn set_stat(&self, user_id: &str, stat: StatName, value: i32) -> sqlx::Result<()> {
        // Column names come from StatName, never from user input
        let column = stat.column();
        let sql = format!(
            "INSERT INTO player_stats (user_id, {column}, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET {column} = excluded.{column},
                 updated_at = excluded.updated_at"
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(value)
            .bind(chrono::Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        debug!("Set {} = {} for {}", stat, value, user_id);
        Ok(())
    }
}
