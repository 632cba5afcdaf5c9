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

pub mod category_repository;
pub mod page_repository;
pub mod profile_repository;
pub mod session_repository;
pub mod user_repository;

pub use category_repository::*;
pub use page_repository::*;
pub use profile_repository::*;
pub use session_repository::*;
pub use user_repository::*;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Parse a stored datetime column. Rows written through the repositories
/// carry RFC3339 values; rows filled by SQLite's datetime('now') defaults
/// carry the space-separated format.
pub(crate) fn parse_datetime(raw: &str, column: &str) -> Result<DateTime<Utc>> {
    if raw.contains('T') {
        Ok(DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Failed to parse {} as RFC3339", column))?
            .with_timezone(&Utc))
    } else {
        Ok(
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .with_context(|| format!("Failed to parse {} as SQLite format", column))?
                .and_utc(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_rfc3339() {
        let parsed = parse_datetime("2026-08-07T12:00:00+00:00", "created_at").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-07T12:00:00+00:00");
    }

    #[test]
    fn test_parse_datetime_sqlite_format() {
        assert!(parse_datetime("2026-08-07 12:00:00", "created_at").is_ok());
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("garbage", "created_at").is_err());
    }
}
