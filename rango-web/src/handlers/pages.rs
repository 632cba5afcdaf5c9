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

use anyhow::Context as _;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use rango_core::forms::PageForm;
use rango_core::models::category::Category;
use rango_db::repositories::{CategoryRepository, PageRepository};

use crate::{
    auth::{CurrentUser, RequireLogin},
    error::AppError,
    handlers::base_context,
    templates::render,
    AppState,
};

async fn find_category(state: &AppState, slug: &str) -> Result<Option<Category>, AppError> {
    Ok(CategoryRepository::new(state.db.clone())
        .find_by_slug(slug)
        .await?)
}

fn add_page_context(user: &CurrentUser, category: &Category) -> tera::Context {
    let mut context = base_context(Some(user));
    context.insert("category", category);
    context.insert("form", &serde_json::json!({ "title": "", "url": "" }));
    context
}

/// Page-creation form. You cannot add a page to a category that does not
/// exist, so an unknown slug redirects home.
pub async fn add_page_form(
    State(state): State<AppState>,
    RequireLogin(user): RequireLogin,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let category = match find_category(&state, &slug).await? {
        Some(category) => category,
        None => return Ok(Redirect::to("/").into_response()),
    };

    let context = add_page_context(&user, &category);
    let html = render(&state.templates, "add_page.html", &context)?;
    Ok(html.into_response())
}

/// Create a page under the named category, or re-render the form with the
/// field errors. The new page's view count is always zero.
pub async fn add_page(
    State(state): State<AppState>,
    RequireLogin(user): RequireLogin,
    Path(slug): Path<String>,
    Form(form): Form<PageForm>,
) -> Result<Response, AppError> {
    let category = match find_category(&state, &slug).await? {
        Some(category) => category,
        None => return Ok(Redirect::to("/").into_response()),
    };

    let category_id = category.id.context("Category row has no id")?;

    match form.validate(category_id) {
        Ok(page) => {
            PageRepository::new(state.db.clone()).create(&page).await?;

            Ok(Redirect::to(&format!("/category/{}/", category.slug)).into_response())
        }
        Err(errors) => {
            tracing::warn!("Invalid page form: {}", errors);

            let mut context = add_page_context(&user, &category);
            context.insert("errors", &errors.0);
            context.insert(
                "form",
                &serde_json::json!({ "title": form.title, "url": form.url }),
            );

            let html = render(&state.templates, "add_page.html", &context)?;
            Ok(html.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_state, create_test_user};
    use anyhow::Result;
    use rango_core::models::session::Session;
    use rango_db::repositories::UserRepository;

    async fn body_text(response: Response) -> Result<String> {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    async fn logged_in_user(state: &crate::AppState) -> Result<CurrentUser> {
        let user_id = create_test_user(state).await?;
        let user = UserRepository::new(state.db.clone())
            .find_by_id(user_id)
            .await?
            .unwrap();

        Ok(CurrentUser {
            session: Session::for_user(user_id),
            user,
        })
    }

    async fn create_category(state: &crate::AppState, name: &str) -> Result<i64> {
        CategoryRepository::new(state.db.clone())
            .create(&Category::new(name.to_string()))
            .await
    }

    #[tokio::test]
    async fn test_add_page_form_renders() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user = logged_in_user(&state).await?;
        create_category(&state, "Python").await?;

        let response = add_page_form(
            State(state),
            RequireLogin(user),
            Path("python".to_string()),
        )
        .await
        .unwrap();

        assert!(response.status().is_success());

        let html = body_text(response).await?;
        assert!(html.contains("Add a Page to Python"));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_page_form_unknown_category_redirects_home() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user = logged_in_user(&state).await?;

        let response = add_page_form(
            State(state),
            RequireLogin(user),
            Path("no-such-category".to_string()),
        )
        .await
        .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get("location").unwrap(), "/");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_page_creates_with_zero_views() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user = logged_in_user(&state).await?;
        let category_id = create_category(&state, "Python").await?;

        let form = PageForm {
            title: "Tutorial".to_string(),
            url: "https://docs.python.org".to_string(),
        };

        let response = add_page(
            State(state.clone()),
            RequireLogin(user),
            Path("python".to_string()),
            Form(form),
        )
        .await
        .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/category/python/"
        );

        let pages = PageRepository::new(state.db.clone())
            .find_by_category(category_id)
            .await?;
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].views, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_page_unknown_category_refused_without_write() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user = logged_in_user(&state).await?;
        create_category(&state, "Python").await?;

        let form = PageForm {
            title: "Tutorial".to_string(),
            url: "https://docs.python.org".to_string(),
        };

        let response = add_page(
            State(state.clone()),
            RequireLogin(user),
            Path("missing".to_string()),
            Form(form),
        )
        .await
        .unwrap();

        assert!(response.status().is_redirection());
        assert_eq!(response.headers().get("location").unwrap(), "/");

        // No page row was written anywhere
        let count = PageRepository::new(state.db.clone()).count().await?;
        assert_eq!(count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_page_invalid_rerenders_with_errors() -> Result<()> {
        let (state, _guard) = create_test_state().await?;
        let user = logged_in_user(&state).await?;
        create_category(&state, "Python").await?;

        let form = PageForm {
            title: "Tutorial".to_string(),
            url: "not-a-url".to_string(),
        };

        let response = add_page(
            State(state.clone()),
            RequireLogin(user),
            Path("python".to_string()),
            Form(form),
        )
        .await
        .unwrap();

        assert!(response.status().is_success());

        let html = body_text(response).await?;
        assert!(html.contains("URL must start with http:// or https://"));
        // Submitted values are round-tripped into the form
        assert!(html.contains("value=\"Tutorial\""));

        Ok(())
    }
}
