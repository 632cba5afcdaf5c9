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

use crate::utils::slug::generate_slug_from_name;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub likes: i64,
    pub views: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category; the slug is derived from the name
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        let slug = generate_slug_from_name(&name);

        Self {
            id: None,
            name,
            slug,
            likes: 0,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate category name format
    pub fn validate_name(name: &str) -> Result<(), String> {
        if name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }

        if name.len() > 128 {
            return Err("Name cannot exceed 128 characters".to_string());
        }

        Ok(())
    }

    /// Validate all category fields
    pub fn is_valid(&self) -> Result<(), String> {
        Self::validate_name(&self.name)?;

        if self.slug.is_empty() {
            return Err("Slug cannot be empty".to_string());
        }

        if self.likes < 0 {
            return Err("Likes cannot be negative".to_string());
        }

        if self.views < 0 {
            return Err("Views cannot be negative".to_string());
        }

        Ok(())
    }
}
