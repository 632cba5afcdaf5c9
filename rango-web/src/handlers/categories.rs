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
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use rango_core::forms::CategoryForm;
use rango_db::repositories::{CategoryRepository, PageRepository};

use crate::{
    auth::{OptionalUser, RequireLogin},
    error::AppError,
    handlers::base_context,
    templates::render,
    AppState,
};

/// Category detail. An unknown slug renders the empty state rather than
/// erroring.
pub async fn show_category(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let mut context = base_context(user.as_ref());

    let category = CategoryRepository::new(state.db.clone())
        .find_by_slug(&slug)
        .await?;

    if let Some(category) = category {
        let category_id = category.id.context("Category row has no id")?;
        let pages = PageRepository::new(state.db.clone())
            .find_by_category(category_id)
            .await?;

        context.insert("category", &category);
        context.insert("pages", &pages);
    }

    render(&state.templates, "category.html", &context)
}

pub async fn add_category_form(
    State(state): State<AppState>,
    RequireLogin(user): RequireLogin,
) -> Result<Html<String>, AppError> {
    let mut context = base_context(Some(&user));
    context.insert("form", &serde_json::json!({ "name": "" }));

    render(&state.templates, "add_category.html", &context)
}

/// Create a category from the submitted form, or re-render it with the
/// field errors.
pub async fn add_category(
    State(state): State<AppState>,
    RequireLogin(user): RequireLogin,
    Form(form): Form<CategoryForm>,
) -> Result<Response, AppError> {
    match form.validate() {
        Ok(category) => {
            CategoryRepository::new(state.db.clone())
                .create(&category)
                .await?;

            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => {
            tracing::warn!("Invalid category form: {}", errors);

            let mut context = base_context(Some(&user));
            context.insert("errors", &errors.0);
            context.insert("form", &serde_json::json!({ "name": form.name }));

            let html = render(&state.templates, "add_category.html", &context)?;
            Ok(html.into_response())
        }
    }
}
