pub mod auth;
pub mod categories;
pub mod home;
pub mod pages;

pub use auth::{login, login_form, logout, register, register_form, restricted};
pub use categories::{add_category, add_category_form, show_category};
pub use home::{about, index};
pub use pages::{add_page, add_page_form};

use crate::auth::CurrentUser;

/// Start a template context, with the logged-in user when there is one
pub(crate) fn base_context(user: Option<&CurrentUser>) -> tera::Context {
    let mut context = tera::Context::new();

    if let Some(current) = user {
        context.insert(
            "user",
            &serde_json::json!({ "username": current.user.username }),
        );
    }

    context
}
