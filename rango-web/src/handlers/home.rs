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

use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use rango_db::repositories::{CategoryRepository, PageRepository};

use crate::{
    auth::OptionalUser,
    error::AppError,
    handlers::base_context,
    session::track_visits,
    templates::render,
    AppState,
};

const TOP_LISTING_LIMIT: i64 = 5;

/// Home page: the five most-liked categories and five most-viewed pages
pub async fn index(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let categories = CategoryRepository::new(state.db.clone())
        .list_top_by_likes(TOP_LISTING_LIMIT)
        .await?;
    let pages = PageRepository::new(state.db.clone())
        .list_top_by_views(TOP_LISTING_LIMIT)
        .await?;

    let (_visits, jar) = track_visits(&state, jar).await?;

    let mut context = base_context(user.as_ref());
    context.insert("boldmessage", "Crunchy, creamy, cookie, candy, cupcake!");
    context.insert("categories", &categories);
    context.insert("pages", &pages);

    let html = render(&state.templates, "index.html", &context)?;
    Ok((jar, html))
}

/// About page, showing how many times the visitor has been here
pub async fn about(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let (visits, jar) = track_visits(&state, jar).await?;

    let mut context = base_context(user.as_ref());
    context.insert("visits", &visits);

    let html = render(&state.templates, "about.html", &context)?;
    Ok((jar, html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_COOKIE;
    use crate::test_helpers::create_test_state;
    use anyhow::Result;
    use rango_core::models::{category::Category, page::Page};

    async fn body_text(response: axum::response::Response) -> Result<String> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    #[tokio::test]
    async fn test_index_renders_empty_listings() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let response = index(State(state), OptionalUser(None), CookieJar::new())
            .await
            .unwrap()
            .into_response();

        let html = body_text(response).await?;
        assert!(html.contains("no categories present"));
        assert!(html.contains("no pages present"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_sets_session_cookie() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let response = index(State(state), OptionalUser(None), CookieJar::new())
            .await
            .unwrap()
            .into_response();

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("session cookie should be set")
            .to_str()?;
        assert!(set_cookie.contains(SESSION_COOKIE));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_lists_top_five_categories_only() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let repo = CategoryRepository::new(state.db.clone());
        for i in 1..=6 {
            let mut category = Category::new(format!("Category {}", i));
            category.likes = i * 10;
            repo.create(&category).await?;
        }

        let response = index(State(state), OptionalUser(None), CookieJar::new())
            .await
            .unwrap()
            .into_response();
        let html = body_text(response).await?;

        // The least-liked of the six is cut off
        assert!(html.contains("Category 6"));
        assert!(html.contains("Category 2"));
        assert!(!html.contains("Category 1<"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_lists_top_pages() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let category_id = CategoryRepository::new(state.db.clone())
            .create(&Category::new("Python".to_string()))
            .await?;

        let page_repo = PageRepository::new(state.db.clone());
        let mut page = Page::new(
            category_id,
            "Popular Page".to_string(),
            "https://example.com".to_string(),
        );
        page.views = 99;
        page_repo.create(&page).await?;

        let response = index(State(state), OptionalUser(None), CookieJar::new())
            .await
            .unwrap()
            .into_response();
        let html = body_text(response).await?;

        assert!(html.contains("Popular Page"));

        Ok(())
    }

    #[tokio::test]
    async fn test_about_shows_visit_count() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        let response = about(State(state), OptionalUser(None), CookieJar::new())
            .await
            .unwrap()
            .into_response();
        let html = body_text(response).await?;

        assert!(html.contains("1 time"));

        Ok(())
    }
}
