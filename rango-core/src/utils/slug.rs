use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("Failed to compile slug regex"));

/// Derive a URL-safe slug from a category name
pub fn generate_slug_from_name(name: &str) -> String {
    let mut slug = name.trim().to_lowercase();

    slug = SLUG_REGEX.replace_all(&slug, "-").to_string();
    slug = slug.trim_matches('-').to_string();

    if slug.is_empty() {
        slug = "unnamed".to_string();
    }

    // Category names are capped at 128 chars; keep slugs within the same bound
    if slug.len() > 128 {
        slug = slug
            .chars()
            .take(128)
            .collect::<String>()
            .trim_end_matches('-')
            .to_string();
    }

    slug
}
