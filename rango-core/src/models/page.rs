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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page {
    pub id: Option<i64>,
    pub category_id: i64,
    pub title: String,
    pub url: String,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Create a new page under an existing category. Views always start at zero.
    pub fn new(category_id: i64, title: String, url: String) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            category_id,
            title,
            url,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate page title format
    pub fn validate_title(title: &str) -> Result<(), String> {
        if title.trim().is_empty() {
            return Err("Title cannot be empty".to_string());
        }

        if title.len() > 128 {
            return Err("Title cannot exceed 128 characters".to_string());
        }

        Ok(())
    }

    /// Validate page URL format
    pub fn validate_url(url: &str) -> Result<(), String> {
        if url.is_empty() {
            return Err("URL cannot be empty".to_string());
        }

        if url.len() > 200 {
            return Err("URL cannot exceed 200 characters".to_string());
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err("URL must start with http:// or https://".to_string());
        }

        Ok(())
    }

    /// Validate all page fields
    pub fn is_valid(&self) -> Result<(), String> {
        Self::validate_title(&self.title)?;
        Self::validate_url(&self.url)?;

        if self.category_id <= 0 {
            return Err("Page must reference an existing category".to_string());
        }

        if self.views < 0 {
            return Err("Views cannot be negative".to_string());
        }

        Ok(())
    }
}
