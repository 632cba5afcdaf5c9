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

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-visitor key/value state carried across requests
pub type SessionData = HashMap<String, String>;

/// Server-side session row, keyed by an opaque id carried in a cookie.
/// Anonymous visitors get a session too (`user_id` is None); logging in
/// binds a fresh session to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: String,
    pub user_id: Option<i64>,
    pub data: SessionData,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

const SESSION_LIFETIME_DAYS: i64 = 14;

impl Session {
    /// Create a new anonymous session with default expiration
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            user_id: None,
            data: SessionData::new(),
            expires_at: now + Duration::days(SESSION_LIFETIME_DAYS),
            created_at: now,
        }
    }

    /// Create a new session bound to a user
    pub fn for_user(user_id: i64) -> Self {
        let mut session = Self::new();
        session.user_id = Some(user_id);
        session
    }

    /// Check if the session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
