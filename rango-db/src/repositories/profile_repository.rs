use anyhow::{Context, Result};
use rango_core::models::profile::UserProfile;
use sqlx::SqlitePool;

use crate::repositories::parse_datetime;

type ProfileRow = (i64, i64, Option<String>, Option<String>, String, String);

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: ProfileRow) -> Result<UserProfile> {
        let (id, user_id, website, picture, created_at, updated_at) = row;

        Ok(UserProfile {
            id: Some(id),
            user_id,
            website,
            picture,
            created_at: parse_datetime(&created_at, "created_at")?,
            updated_at: parse_datetime(&updated_at, "updated_at")?,
        })
    }

    pub async fn create(&self, profile: &UserProfile) -> Result<i64> {
        if let Err(e) = profile.is_valid() {
            return Err(anyhow::anyhow!("Invalid profile: {}", e));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, website, picture, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.website)
        .bind(&profile.picture)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create profile")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, user_id, website, picture, created_at, updated_at
            FROM user_profiles
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find profile by user_id")?;

        row.map(Self::from_row).transpose()
    }
}
