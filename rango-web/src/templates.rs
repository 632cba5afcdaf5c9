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
use axum::response::Html;
use std::path::Path;
use tera::Tera;

use crate::error::AppError;

pub fn init_templates(templates_dir: &str) -> Result<Tera> {
    std::fs::create_dir_all(templates_dir).context("Failed to create templates directory")?;

    create_default_templates(templates_dir)?;

    let glob = format!("{}/**/*.html", templates_dir);
    let tera = Tera::new(&glob).context("Failed to compile templates")?;

    Ok(tera)
}

/// Render a template into an HTML response
pub fn render(templates: &Tera, name: &str, context: &tera::Context) -> Result<Html<String>, AppError> {
    match templates.render(name, context) {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!("Failed to render {}: {:?}", name, e);
            Err(AppError::internal("Template error"))
        }
    }
}

fn write_if_absent(dir: &Path, name: &str, contents: &str) -> Result<()> {
    let path = dir.join(name);
    if !path.exists() {
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to create template {}", name))?;
    }
    Ok(())
}

fn create_default_templates(templates_dir: &str) -> Result<()> {
    let base_dir = Path::new(templates_dir);

    let base_template = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Rango{% endblock %}</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            color: #333;
        }
        nav {
            border-bottom: 1px solid #eee;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }
        nav a {
            margin-right: 15px;
            text-decoration: none;
            color: #0066cc;
        }
        nav a:hover {
            text-decoration: underline;
        }
        .auth-info {
            float: right;
            font-size: 0.9em;
        }
        .errors {
            color: #cc0000;
        }
        footer {
            margin-top: 40px;
            padding-top: 20px;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }
    </style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about/">About</a>
        {% if user %}
            <a href="/add_category/">Add Category</a>
            <a href="/restricted/">Restricted</a>
            <span class="auth-info">
                {{ user.username }} |
                <a href="/logout/">Logout</a>
            </span>
        {% else %}
            <span class="auth-info">
                <a href="/register/">Register</a>
                <a href="/login/">Login</a>
            </span>
        {% endif %}
    </nav>

    <main>
        {% block content %}{% endblock %}
    </main>

    <footer>
        <p>Rango says... wubba lubba dub dub!</p>
    </footer>
</body>
</html>"#;

    let index_template = r#"{% extends "base.html" %}

{% block title %}Rango{% endblock %}

{% block content %}
<h1>Rango says... {{ boldmessage }}</h1>

<h2>Most Liked Categories</h2>
{% if categories %}
<ul>
    {% for category in categories %}
    <li><a href="/category/{{ category.slug }}/">{{ category.name }}</a> ({{ category.likes }} likes)</li>
    {% endfor %}
</ul>
{% else %}
<p>There are no categories present.</p>
{% endif %}

<h2>Most Viewed Pages</h2>
{% if pages %}
<ul>
    {% for page in pages %}
    <li><a href="{{ page.url }}">{{ page.title }}</a> ({{ page.views }} views)</li>
    {% endfor %}
</ul>
{% else %}
<p>There are no pages present.</p>
{% endif %}
{% endblock %}"#;

    let about_template = r#"{% extends "base.html" %}

{% block title %}About - Rango{% endblock %}

{% block content %}
<h1>About Rango</h1>
<p>Rango is a directory of categories and the pages that belong to them.</p>
<p>You have visited this site {{ visits }} time{{ visits | pluralize }}.</p>
{% endblock %}"#;

    let category_template = r#"{% extends "base.html" %}

{% block title %}{% if category %}{{ category.name }}{% else %}Unknown Category{% endif %} - Rango{% endblock %}

{% block content %}
{% if category %}
<h1>{{ category.name }}</h1>

{% if pages %}
<ul>
    {% for page in pages %}
    <li><a href="{{ page.url }}">{{ page.title }}</a> ({{ page.views }} views)</li>
    {% endfor %}
</ul>
{% else %}
<p>No pages currently in category.</p>
{% endif %}

{% if user %}
<p><a href="/category/{{ category.slug }}/add_page/">Add a Page</a></p>
{% endif %}
{% else %}
<p>The specified category does not exist.</p>
{% endif %}
{% endblock %}"#;

    let add_category_template = r#"{% extends "base.html" %}

{% block title %}Add Category - Rango{% endblock %}

{% block content %}
<h1>Add a Category</h1>

{% if errors %}
<ul class="errors">
    {% for error in errors %}
    <li>{{ error.field }}: {{ error.message }}</li>
    {% endfor %}
</ul>
{% endif %}

<form method="post" action="/add_category/">
    <div style="margin-bottom: 15px;">
        <label for="name">Name:</label><br>
        <input type="text" id="name" name="name" value="{{ form.name | default(value="") }}" maxlength="128" required style="width: 300px; padding: 5px;">
    </div>

    <div>
        <button type="submit" style="padding: 5px 20px;">Create Category</button>
    </div>
</form>
{% endblock %}"#;

    let add_page_template = r#"{% extends "base.html" %}

{% block title %}Add Page - Rango{% endblock %}

{% block content %}
<h1>Add a Page to {{ category.name }}</h1>

{% if errors %}
<ul class="errors">
    {% for error in errors %}
    <li>{{ error.field }}: {{ error.message }}</li>
    {% endfor %}
</ul>
{% endif %}

<form method="post" action="/category/{{ category.slug }}/add_page/">
    <div style="margin-bottom: 15px;">
        <label for="title">Title:</label><br>
        <input type="text" id="title" name="title" value="{{ form.title | default(value="") }}" maxlength="128" required style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="url">URL:</label><br>
        <input type="url" id="url" name="url" value="{{ form.url | default(value="") }}" maxlength="200" required style="width: 300px; padding: 5px;">
    </div>

    <div>
        <button type="submit" style="padding: 5px 20px;">Create Page</button>
    </div>
</form>
{% endblock %}"#;

    let register_template = r#"{% extends "base.html" %}

{% block title %}Register - Rango{% endblock %}

{% block content %}
<h1>Register for Rango</h1>

{% if registered %}
<p>Thank you for registering!</p>
<p><a href="/login/">Log in</a> to get started.</p>
{% else %}
{% if errors %}
<ul class="errors">
    {% for error in errors %}
    <li>{{ error.field }}: {{ error.message }}</li>
    {% endfor %}
</ul>
{% endif %}

<form method="post" action="/register/" enctype="multipart/form-data">
    <div style="margin-bottom: 15px;">
        <label for="username">Username:</label><br>
        <input type="text" id="username" name="username" value="{{ form.username | default(value="") }}" required style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="email">Email:</label><br>
        <input type="email" id="email" name="email" value="{{ form.email | default(value="") }}" required style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="password">Password:</label><br>
        <input type="password" id="password" name="password" required style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="website">Website (optional):</label><br>
        <input type="url" id="website" name="website" value="{{ form.website | default(value="") }}" style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="picture">Profile picture (optional):</label><br>
        <input type="file" id="picture" name="picture" accept="image/*">
    </div>

    <div>
        <button type="submit" style="padding: 5px 20px;">Register</button>
    </div>
</form>
{% endif %}
{% endblock %}"#;

    let login_template = r#"{% extends "base.html" %}

{% block title %}Login - Rango{% endblock %}

{% block content %}
<h1>Login to Rango</h1>

<form method="post" action="/login/">
    <div style="margin-bottom: 15px;">
        <label for="username">Username:</label><br>
        <input type="text" id="username" name="username" required style="width: 300px; padding: 5px;">
    </div>

    <div style="margin-bottom: 15px;">
        <label for="password">Password:</label><br>
        <input type="password" id="password" name="password" required style="width: 300px; padding: 5px;">
    </div>

    <div>
        <button type="submit" style="padding: 5px 20px;">Login</button>
    </div>
</form>
{% endblock %}"#;

    let restricted_template = r#"{% extends "base.html" %}

{% block title %}Restricted - Rango{% endblock %}

{% block content %}
<h1>Restricted Page</h1>
<p>Since you're logged in, you can see this text!</p>
{% endblock %}"#;

    write_if_absent(base_dir, "base.html", base_template)?;
    write_if_absent(base_dir, "index.html", index_template)?;
    write_if_absent(base_dir, "about.html", about_template)?;
    write_if_absent(base_dir, "category.html", category_template)?;
    write_if_absent(base_dir, "add_category.html", add_category_template)?;
    write_if_absent(base_dir, "add_page.html", add_page_template)?;
    write_if_absent(base_dir, "register.html", register_template)?;
    write_if_absent(base_dir, "login.html", login_template)?;
    write_if_absent(base_dir, "restricted.html", restricted_template)?;

    Ok(())
}
