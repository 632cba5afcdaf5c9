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
use rango_core::models::page::Page;
use sqlx::SqlitePool;

use crate::repositories::parse_datetime;

type PageRow = (i64, i64, String, String, i64, String, String);

pub struct PageRepository {
    pool: SqlitePool,
}

impl PageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn from_row(row: PageRow) -> Result<Page> {
        let (id, category_id, title, url, views, created_at, updated_at) = row;

        Ok(Page {
            id: Some(id),
            category_id,
            title,
            url,
            views,
            created_at: parse_datetime(&created_at, "created_at")?,
            updated_at: parse_datetime(&updated_at, "updated_at")?,
        })
    }

    pub async fn create(&self, page: &Page) -> Result<i64> {
        if let Err(e) = page.is_valid() {
            return Err(anyhow::anyhow!("Invalid page: {}", e));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO pages (category_id, title, url, views, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(page.category_id)
        .bind(&page.title)
        .bind(&page.url)
        .bind(page.views)
        .bind(page.created_at)
        .bind(page.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to create page")?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, created_at, updated_at
            FROM pages
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find page by id")?;

        row.map(Self::from_row).transpose()
    }

    /// All pages belonging to a category, most-viewed first
    pub async fn find_by_category(&self, category_id: i64) -> Result<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, created_at, updated_at
            FROM pages
            WHERE category_id = ?
            ORDER BY views DESC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to find pages by category")?;

        rows.into_iter().map(Self::from_row).collect()
    }

    /// Most-viewed pages first, at most `limit`
    pub async fn list_top_by_views(&self, limit: i64) -> Result<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT id, category_id, title, url, views, created_at, updated_at
            FROM pages
            ORDER BY views DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pages by views")?;

        rows.into_iter().map(Self::from_row).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count pages")?;

        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_schema;
    use crate::repositories::category_repository::CategoryRepository;
    use rango_core::models::category::Category;

    async fn create_test_pool() -> Result<SqlitePool> {
        let pool = SqlitePool::connect(":memory:").await?;
        create_schema(&pool).await?;
        Ok(pool)
    }

    async fn create_test_category(pool: &SqlitePool, name: &str) -> Result<i64> {
        CategoryRepository::new(pool.clone())
            .create(&Category::new(name.to_string()))
            .await
    }

    #[tokio::test]
    async fn test_create_and_find_by_category() -> Result<()> {
        let pool = create_test_pool().await?;
        let category_id = create_test_category(&pool, "Python").await?;
        let repo = PageRepository::new(pool);

        let page = Page::new(
            category_id,
            "Official Tutorial".to_string(),
            "https://docs.python.org/3/tutorial/".to_string(),
        );
        let id = repo.create(&page).await?;
        assert!(id > 0);

        let pages = repo.find_by_category(category_id).await?;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Official Tutorial");
        assert_eq!(pages[0].views, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_category_empty() -> Result<()> {
        let pool = create_test_pool().await?;
        let category_id = create_test_category(&pool, "Empty").await?;
        let repo = PageRepository::new(pool);

        let pages = repo.find_by_category(category_id).await?;
        assert!(pages.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_category_ordered_by_views() -> Result<()> {
        let pool = create_test_pool().await?;
        let category_id = create_test_category(&pool, "Python").await?;
        let repo = PageRepository::new(pool);

        for (title, views) in [("Low", 3), ("High", 90), ("Mid", 40)] {
            let mut page = Page::new(
                category_id,
                title.to_string(),
                "https://example.com".to_string(),
            );
            page.views = views;
            repo.create(&page).await?;
        }

        let pages = repo.find_by_category(category_id).await?;
        let titles: Vec<&str> = pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["High", "Mid", "Low"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_top_by_views_orders_and_limits() -> Result<()> {
        let pool = create_test_pool().await?;
        let category_id = create_test_category(&pool, "Python").await?;
        let repo = PageRepository::new(pool);

        for views in [10, 64, 16, 32, 45, 25, 5] {
            let mut page = Page::new(
                category_id,
                format!("Page {}", views),
                "https://example.com".to_string(),
            );
            page.views = views;
            repo.create(&page).await?;
        }

        let top = repo.list_top_by_views(5).await?;
        assert_eq!(top.len(), 5);

        let views: Vec<i64> = top.iter().map(|p| p.views).collect();
        assert_eq!(views, vec![64, 45, 32, 25, 16]);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_invalid_page_fails() -> Result<()> {
        let pool = create_test_pool().await?;
        let repo = PageRepository::new(pool);

        let page = Page::new(1, String::new(), "https://example.com".to_string());
        assert!(repo.create(&page).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_count() -> Result<()> {
        let pool = create_test_pool().await?;
        let category_id = create_test_category(&pool, "Python").await?;
        let repo = PageRepository::new(pool);

        assert_eq!(repo.count().await?, 0);

        repo.create(&Page::new(
            category_id,
            "Title".to_string(),
            "https://example.com".to_string(),
        ))
        .await?;

        assert_eq!(repo.count().await?, 1);

        Ok(())
    }
}
