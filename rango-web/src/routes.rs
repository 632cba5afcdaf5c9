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
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{handlers, AppState};

pub fn create_router(state: AppState) -> Router {
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        .route("/", get(handlers::index))
        .route("/about/", get(handlers::about))
        .route("/category/{slug}/", get(handlers::show_category))
        .route(
            "/category/{slug}/add_page/",
            get(handlers::add_page_form).post(handlers::add_page),
        )
        .route(
            "/add_category/",
            get(handlers::add_category_form).post(handlers::add_category),
        )
        .route(
            "/register/",
            get(handlers::register_form).post(handlers::register),
        )
        .route("/login/", get(handlers::login_form).post(handlers::login))
        .route("/logout/", get(handlers::logout))
        .route("/restricted/", get(handlers::restricted))
        // Static assets and uploaded profile pictures
        .nest_service("/static", ServeDir::new("static"))
        .nest_service("/media", ServeDir::new(&state.config.uploads_dir))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(max_upload_size))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_state;
    use anyhow::Result;

    #[tokio::test]
    async fn test_create_router() -> Result<()> {
        let (state, _guard) = create_test_state().await?;

        // Building the router panics on malformed route definitions
        let _router = create_router(state);

        Ok(())
    }
}
