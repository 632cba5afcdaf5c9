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

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::Redirect,
    RequestPartsExt,
};
use axum_extra::extract::CookieJar;
use rango_core::models::{session::Session, user::User};
use rango_db::repositories::{SessionRepository, UserRepository};

use crate::{session::SESSION_COOKIE, AppState};

/// Current authenticated user, extracted from the session cookie
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub session: Session,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = parts
            .extract::<CookieJar>()
            .await
            .map_err(|_| (StatusCode::UNAUTHORIZED, "No session found"))?;

        let session_id = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or((StatusCode::UNAUTHORIZED, "No session found"))?;

        let app_state = AppState::from_ref(state);

        let session_repo = SessionRepository::new(app_state.db.clone());
        let session = session_repo
            .find_by_id(&session_id)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Database error"))?
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid session"))?;

        if session.is_expired() {
            return Err((StatusCode::UNAUTHORIZED, "Session expired"));
        }

        let user_id = session
            .user_id
            .ok_or((StatusCode::UNAUTHORIZED, "Not logged in"))?;

        let user_repo = UserRepository::new(app_state.db.clone());
        let user = user_repo
            .find_by_id(user_id)
            .await
            .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Database error"))?
            .ok_or((StatusCode::UNAUTHORIZED, "User not found"))?;

        if !user.is_active {
            return Err((StatusCode::FORBIDDEN, "Account disabled"));
        }

        Ok(CurrentUser { user, session })
    }
}

/// Optional authenticated user, for pages that render either way
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalUser(Some(user))),
            Err((StatusCode::UNAUTHORIZED, _)) => Ok(OptionalUser(None)),
            Err(e) => Err(e),
        }
    }
}

/// Require a logged-in user; unauthenticated requests are redirected to
/// the login page before the handler runs.
#[derive(Debug, Clone)]
pub struct RequireLogin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireLogin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        CurrentUser::from_request_parts(parts, state)
            .await
            .map(RequireLogin)
            .map_err(|_| Redirect::to("/login/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::start_user_session;
    use crate::test_helpers::{create_test_state, create_test_user};
    use anyhow::Result;
    use axum::http::Request;
    use rango_core::models::session::SessionData;

    fn parts_with_cookie(session_id: &str) -> Parts {
        Request::builder()
            .uri("/")
            .header("cookie", format!("{}={}", SESSION_COOKIE, session_id))
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn parts_without_cookie() -> Parts {
        Request::builder().uri("/").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_current_user_with_valid_session() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user_id = create_test_user(&state).await?;

        let jar = start_user_session(
            &state,
            axum_extra::extract::CookieJar::new(),
            user_id,
            SessionData::new(),
        )
        .await?;
        let session_id = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        let mut parts = parts_with_cookie(&session_id);
        let current = CurrentUser::from_request_parts(&mut parts, &state).await;

        assert!(current.is_ok());
        assert_eq!(current.unwrap().user.id, Some(user_id));

        Ok(())
    }

    #[tokio::test]
    async fn test_current_user_without_cookie_rejected() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let mut parts = parts_without_cookie();
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_current_user_anonymous_session_rejected() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        // Anonymous visitor session: present but not logged in
        let (session, _) =
            crate::session::load_or_create(&state, axum_extra::extract::CookieJar::new()).await?;

        let mut parts = parts_with_cookie(&session.id);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().0, StatusCode::UNAUTHORIZED);

        Ok(())
    }

    #[tokio::test]
    async fn test_current_user_disabled_account_forbidden() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user_id = create_test_user(&state).await?;

        sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(user_id)
            .execute(&state.db)
            .await?;

        let jar = start_user_session(
            &state,
            axum_extra::extract::CookieJar::new(),
            user_id,
            SessionData::new(),
        )
        .await?;
        let session_id = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        let mut parts = parts_with_cookie(&session_id);
        let result = CurrentUser::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().0, StatusCode::FORBIDDEN);

        Ok(())
    }

    #[tokio::test]
    async fn test_optional_user_absent_is_none() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let mut parts = parts_without_cookie();
        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();

        assert!(user.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_require_login_redirects() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let mut parts = parts_without_cookie();
        let result = RequireLogin::from_request_parts(&mut parts, &state).await;

        assert!(result.is_err());

        Ok(())
    }
}
