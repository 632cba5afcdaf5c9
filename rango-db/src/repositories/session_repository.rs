use anyhow::{Context, Result};
use rango_core::models::session::{Session, SessionData};
use sqlx::SqlitePool;

use crate::repositories::parse_datetime;

type SessionRow = (String, Option<i64>, String, String, String);

pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: SessionRow) -> Result<Session> {
        let (id, user_id, data, expires_at, created_at) = row;

        let data: SessionData =
            serde_json::from_str(&data).context("Failed to parse session data")?;

        Ok(Session {
            id,
            user_id,
            data,
            expires_at: parse_datetime(&expires_at, "expires_at")?,
            created_at: parse_datetime(&created_at, "created_at")?,
        })
    }

    pub async fn create(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_string(&session.data)
            .context("Failed to serialize session data")?;

        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, data, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(data)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create session")?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, data, expires_at, created_at
            FROM sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find session by id")?;

        row.map(Self::from_row).transpose()
    }

    /// Persist the session's key/value state
    pub async fn update_data(&self, id: &str, data: &SessionData) -> Result<()> {
        let serialized = serde_json::to_string(data).context("Failed to serialize session data")?;

        sqlx::query("UPDATE sessions SET data = ? WHERE id = ?")
            .bind(serialized)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update session data")?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    pub async fn delete_expired(&self) -> Result<u64> {
        let now = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}
