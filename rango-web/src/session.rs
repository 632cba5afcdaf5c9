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

//! Visitor session plumbing. Every visitor gets a server-side session row
//! keyed by the `session_id` cookie, whether or not they are logged in;
//! the visit counter lives in the session's key/value state.

use anyhow::Result;
use axum_extra::extract::{cookie::Cookie, CookieJar};
use chrono::Utc;
use rango_core::models::session::{Session, SessionData};
use rango_core::visits::track_visit;
use rango_db::repositories::SessionRepository;

use crate::AppState;

pub const SESSION_COOKIE: &str = "session_id";

pub fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .build()
}

/// Load the visitor's session from the cookie, or create a fresh
/// anonymous one (adding its cookie to the jar) when there is none,
/// it is unknown, or it has expired.
pub async fn load_or_create(state: &AppState, jar: CookieJar) -> Result<(Session, CookieJar)> {
    let repo = SessionRepository::new(state.db.clone());

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Some(session) = repo.find_by_id(cookie.value()).await? {
            if !session.is_expired() {
                return Ok((session, jar));
            }
        }
    }

    let session = Session::new();
    repo.create(&session).await?;

    let jar = jar.add(session_cookie(session.id.clone()));
    Ok((session, jar))
}

/// Run the visit tracker against the visitor's session and persist the
/// result. Returns the visit count and the (possibly updated) jar.
pub async fn track_visits(state: &AppState, jar: CookieJar) -> Result<(i64, CookieJar)> {
    let (mut session, jar) = load_or_create(state, jar).await?;

    let visits = track_visit(&mut session.data, Utc::now());

    SessionRepository::new(state.db.clone())
        .update_data(&session.id, &session.data)
        .await?;

    Ok((visits, jar))
}

/// Replace the visitor's session with one bound to a user, carrying the
/// existing key/value state over. The old anonymous row is deleted.
pub async fn start_user_session(
    state: &AppState,
    jar: CookieJar,
    user_id: i64,
    data: SessionData,
) -> Result<CookieJar> {
    let repo = SessionRepository::new(state.db.clone());

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let _ = repo.delete(cookie.value()).await; // Ignore errors
    }

    let mut session = Session::for_user(user_id);
    session.data = data;
    repo.create(&session).await?;

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));
    let jar = jar.add(session_cookie(session.id.clone()));
    Ok(jar)
}

/// End the visitor's session and clear the cookie
pub async fn end_session(state: &AppState, jar: CookieJar) -> Result<CookieJar> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let repo = SessionRepository::new(state.db.clone());
        let _ = repo.delete(cookie.value()).await; // Ignore errors
    }

    Ok(jar.remove(Cookie::from(SESSION_COOKIE)))
}
