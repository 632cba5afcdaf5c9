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

use anyhow::Result;
use rango_core::models::user::User;
use rango_db::{create_schema, repositories::UserRepository};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::{config::Config, templates::init_templates, AppState};

/// Test state over an in-memory database and a throwaway template/upload
/// directory. The returned TempDir must be held for the state's lifetime.
pub async fn create_test_state() -> Result<(AppState, TempDir)> {
    let pool = SqlitePool::connect(":memory:").await?;
    create_schema(&pool).await?;

    let dir = tempfile::tempdir()?;
    let templates_dir = dir.path().join("templates").to_string_lossy().to_string();
    let uploads_dir = dir.path().join("uploads").to_string_lossy().to_string();

    let templates = init_templates(&templates_dir)?;

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        host: "localhost".to_string(),
        port: 3000,
        templates_dir,
        uploads_dir,
        max_upload_size: 1_048_576,
        development_mode: false,
    };

    Ok((AppState::new(pool, templates, config), dir))
}

pub async fn create_test_user(state: &AppState) -> Result<i64> {
    let user = User::new(
        "test@example.com".to_string(),
        "testuser".to_string(),
        "password123",
    )?;

    UserRepository::new(state.db.clone()).create(&user).await
}
