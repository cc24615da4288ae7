use serde::Serialize;

use super::{max_length, required, FormErrors};
use crate::database::models::{Blog, Category};

pub const TITLE_MAX_LENGTH: usize = 200;

/// Raw blog submission. Keys other than `title`, `body` and `categories`
/// are dropped, so an `author` value can never reach the record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlogInput {
    pub title: String,
    pub body: String,
    pub categories: Vec<String>,
}

impl BlogInput {
    /// Collects the url-encoded pairs of a submitted form, `categories` may be
    /// repeated once per selected option.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut input = BlogInput::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => input.title = value,
                "body" => input.body = value,
                "categories" => input.categories.push(value),
                _ => {}
            }
        }
        input
    }
}

/// Validated blog fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogFields {
    pub title: String,
    pub body: String,
    /// Ascending, without duplicates.
    pub categories: Vec<i32>,
}

pub fn validate_blog(input: &BlogInput, available: &[Category]) -> Result<BlogFields, FormErrors> {
    let mut errors = FormErrors::default();

    let title = required(&mut errors, "title", &input.title);
    max_length(&mut errors, "title", &title, TITLE_MAX_LENGTH);
    let body = required(&mut errors, "body", &input.body);

    let mut categories = Vec::with_capacity(input.categories.len());
    for raw in &input.categories {
        match raw.trim().parse::<i32>() {
            Ok(id) if available.iter().any(|category| category.id == id) => categories.push(id),
            _ => errors.add_field(
                "categories",
                format!(
                    "Select a valid choice. {} is not one of the available choices.",
                    raw
                ),
            ),
        }
    }
    categories.sort_unstable();
    categories.dedup();

    errors.into_result(BlogFields {
        title,
        body,
        categories,
    })
}

/// What the blog templates render as the create or edit form.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BlogForm {
    pub title: String,
    pub body: String,
    pub categories: Vec<i32>,
    pub errors: FormErrors,
}

impl BlogForm {
    pub fn from_record(blog: &Blog, categories: Vec<i32>) -> Self {
        Self {
            title: blog.title.clone(),
            body: blog.body.clone(),
            categories,
            errors: FormErrors::default(),
        }
    }

    /// Keeps what the user typed so it can be corrected.
    pub fn bound(input: &BlogInput, errors: FormErrors) -> Self {
        Self {
            title: input.title.clone(),
            body: input.body.clone(),
            categories: input
                .categories
                .iter()
                .filter_map(|raw| raw.trim().parse().ok())
                .collect(),
            errors,
        }
    }
}
