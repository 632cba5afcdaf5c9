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

use anyhow::{Context as _, Result};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use rango_core::forms::{FormErrors, ProfileForm, UserForm};
use rango_db::repositories::{ProfileRepository, UserRepository};
use serde::Deserialize;

use crate::{
    auth::{OptionalUser, RequireLogin},
    error::AppError,
    handlers::base_context,
    session::{end_session, load_or_create, start_user_session},
    templates::render,
    uploads::{save_profile_picture, ImageFormat},
    AppState,
};

/// Parsed multipart registration submission
#[derive(Debug, Default)]
pub struct RegisterSubmission {
    pub user_form: UserForm,
    pub profile_form: ProfileForm,
    pub picture: Option<Vec<u8>>,
}

pub async fn register_form(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>, AppError> {
    let mut context = base_context(user.as_ref());
    context.insert("registered", &false);
    context.insert(
        "form",
        &serde_json::json!({ "username": "", "email": "", "website": "" }),
    );

    render(&state.templates, "register.html", &context)
}

/// Handle a registration submission: validate both forms, then persist
/// the user and, in a second step, the profile referencing it.
pub async fn register(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = parse_register_form(&mut multipart)
        .await
        .map_err(|_| AppError::new(StatusCode::BAD_REQUEST, "Invalid form data"))?;

    let mut context = base_context(user.as_ref());

    match process_registration(&state, &submission).await? {
        Ok(()) => {
            context.insert("registered", &true);
        }
        Err(errors) => {
            tracing::warn!("Invalid registration form: {}", errors);

            context.insert("registered", &false);
            context.insert("errors", &errors.0);
            context.insert(
                "form",
                &serde_json::json!({
                    "username": submission.user_form.username,
                    "email": submission.user_form.email,
                    "website": submission.profile_form.website,
                }),
            );
        }
    }

    let html = render(&state.templates, "register.html", &context)?;
    Ok(html.into_response())
}

async fn parse_register_form(multipart: &mut Multipart) -> Result<RegisterSubmission> {
    let mut submission = RegisterSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|name| name.to_string());

        match name.as_deref() {
            Some("username") => submission.user_form.username = field.text().await?,
            Some("email") => submission.user_form.email = field.text().await?,
            Some("password") => submission.user_form.password = field.text().await?,
            Some("website") => submission.profile_form.website = field.text().await?,
            Some("picture") => {
                let data = field.bytes().await?;
                if !data.is_empty() {
                    submission.picture = Some(data.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Validate both forms, then create the user row and the profile row
/// referencing it. Validation failures come back in the inner Err; store
/// failures propagate.
pub async fn process_registration(
    state: &AppState,
    submission: &RegisterSubmission,
) -> Result<Result<(), FormErrors>, AppError> {
    let mut errors = FormErrors::new();

    let user_result = submission.user_form.validate();
    if let Err(e) = &user_result {
        errors.0.extend_from_slice(&e.0);
    }

    if let Err(e) = submission.profile_form.validate() {
        errors.0.extend(e.0);
    }

    if let Some(data) = &submission.picture {
        if let Err(e) = ImageFormat::detect(data) {
            errors.push("picture", e.to_string());
        }
    }

    let user = match user_result {
        Ok(user) if errors.is_empty() => user,
        _ => return Ok(Err(errors)),
    };

    // Two-phase create: the user row must exist before the profile can
    // reference it
    let user_id = UserRepository::new(state.db.clone()).create(&user).await?;

    let mut profile = submission.profile_form.build(user_id);

    if let Some(data) = &submission.picture {
        let filename =
            save_profile_picture(&state.config.uploads_dir, data).context("Failed to store picture")?;
        profile.picture = Some(filename);
    }

    ProfileRepository::new(state.db.clone())
        .create(&profile)
        .await?;

    Ok(Ok(()))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login_form(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>, AppError> {
    let context = base_context(user.as_ref());

    render(&state.templates, "login.html", &context)
}

/// Handle a login attempt. Bad credentials and disabled accounts get a
/// plain-text message; success binds the session to the user and goes
/// back to the home page.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = UserRepository::new(state.db.clone())
        .find_by_username(&form.username)
        .await?;

    let user = match user {
        Some(user) => user,
        None => {
            tracing::warn!("Invalid login details: {}", form.username);
            return Ok("Invalid login details supplied.".into_response());
        }
    };

    if !user.verify_password(&form.password)? {
        tracing::warn!("Invalid login details: {}", form.username);
        return Ok("Invalid login details supplied.".into_response());
    }

    if !user.is_active {
        return Ok("Your Rango account has been disabled.".into_response());
    }

    let user_id = user.id.context("User row has no id")?;

    // Carry the visitor's session state (visit counter) over into the
    // logged-in session
    let (session, jar) = load_or_create(&state, jar).await?;
    let jar = start_user_session(&state, jar, user_id, session.data).await?;

    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn logout(
    State(state): State<AppState>,
    RequireLogin(_user): RequireLogin,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let jar = end_session(&state, jar).await?;

    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn restricted(
    State(state): State<AppState>,
    RequireLogin(user): RequireLogin,
) -> Result<Html<String>, AppError> {
    let context = base_context(Some(&user));

    render(&state.templates, "restricted.html", &context)
}
