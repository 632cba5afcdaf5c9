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

/// One-to-one companion record for a user. Created in a second step after
/// the user row exists, since it must reference the user's id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub user_id: i64,
    pub website: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();

        Self {
            id: None,
            user_id,
            website: None,
            picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate website URL format
    pub fn validate_website(website: &str) -> Result<(), String> {
        if website.len() > 200 {
            return Err("Website cannot exceed 200 characters".to_string());
        }

        if !website.starts_with("http://") && !website.starts_with("https://") {
            return Err("Website must start with http:// or https://".to_string());
        }

        Ok(())
    }

    /// Validate all profile fields
    pub fn is_valid(&self) -> Result<(), String> {
        if self.user_id <= 0 {
            return Err("Profile must reference an existing user".to_string());
        }

        if let Some(website) = &self.website {
            Self::validate_website(website)?;
        }

        Ok(())
    }
}
