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

//! Submitted-form validation. Each form checks its raw fields and either
//! yields the record to be persisted or a set of per-field errors for the
//! template to re-render.

use serde::{Deserialize, Serialize};

use crate::models::{Category, Page, User, UserProfile};

/// A single failed field with its message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field errors in submission order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, field: &str, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<Category, FormErrors> {
        let mut errors = FormErrors::new();
        let name = self.name.trim();

        if let Err(message) = Category::validate_name(name) {
            errors.push("name", message);
        }

        errors.into_result(Category::new(name.to_string()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageForm {
    pub title: String,
    pub url: String,
}

impl PageForm {
    /// Validate the submitted fields and build a page under the given
    /// category. The view count is always zero regardless of input.
    pub fn validate(&self, category_id: i64) -> Result<Page, FormErrors> {
        let mut errors = FormErrors::new();
        let title = self.title.trim();

        if let Err(message) = Page::validate_title(title) {
            errors.push("title", message);
        }

        if let Err(message) = Page::validate_url(&self.url) {
            errors.push("url", message);
        }

        errors.into_result(Page::new(category_id, title.to_string(), self.url.clone()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserForm {
    pub fn validate(&self) -> Result<User, FormErrors> {
        let mut errors = FormErrors::new();

        if let Err(message) = User::validate_username(&self.username) {
            errors.push("username", message);
        }

        if let Err(message) = User::validate_email(&self.email) {
            errors.push("email", message);
        }

        if self.password.is_empty() {
            errors.push("password", "Password cannot be empty".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match User::new(self.email.clone(), self.username.clone(), &self.password) {
            Ok(user) => Ok(user),
            Err(e) => {
                errors.push("password", e.to_string());
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    pub website: String,
}

impl ProfileForm {
    /// Validate the submitted fields. Checked before any row is written,
    /// so this cannot reference the not-yet-persisted user.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        let website = self.website.trim();

        if !website.is_empty() {
            if let Err(message) = UserProfile::validate_website(website) {
                errors.push("website", message);
            }
        }

        errors.into_result(())
    }

    /// Build the profile referencing an already-persisted user. An empty
    /// website is stored as None.
    pub fn build(&self, user_id: i64) -> UserProfile {
        let website = self.website.trim();

        let mut profile = UserProfile::new(user_id);
        if !website.is_empty() {
            profile.website = Some(website.to_string());
        }

        profile
    }
}
