// Rango - a category and page directory built with Rust
// Copyright (C) 2026 Rango Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use anyhow::{Context, Result};
use rango_core::models::category::Category;
use sqlx::SqlitePool;

use crate::repositories::parse_datetime;

type CategoryRow = (i64, String, String, i64, i64, String, String);

pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: CategoryRow) -> Result<Category> {
        let (id, name, slug, likes, views, created_at, updated_at) = row;

        Ok(Category {
            id: Some(id),
            name,
            slug,
            likes,
            views,
            created_at: parse_datetime(&created_at, "created_at")?,
            updated_at: parse_datetime(&updated_at, "updated_at")?,
        })
    }

    pub async fn create(&self, category: &Category) -> Result<i64> {
        if let Err(e) = category.is_valid() {
            return Err(anyhow::anyhow!("Invalid category: {}", e));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO categories (name, slug, likes, views, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.likes)
        .bind(category.views)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create category")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, likes, views, created_at, updated_at
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find category by id")?;

        row.map(Self::from_row).transpose()
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, likes, views, created_at, updated_at
            FROM categories
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find category by slug")?;

        row.map(Self::from_row).transpose()
    }

    /// Most-liked categories first, at most `limit`
    pub async fn list_top_by_likes(&self, limit: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, likes, views, created_at, updated_at
            FROM categories
            ORDER BY likes DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories by likes")?;

        rows.into_iter().map(Self::from_row).collect()
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, slug, likes, views, created_at, updated_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        rows.into_iter().map(Self::from_row).collect()
    }
}
