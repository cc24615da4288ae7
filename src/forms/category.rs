use serde::{Deserialize, Serialize};

use super::{max_length, required, FormErrors};
use crate::database::models::Category;

pub const NAME_MAX_LENGTH: usize = 64;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const DUPLICATE_NAME: &str = "Category with this name already exists.";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
}

/// Validates a category submission against the stored categories.
/// `editing` is the id of the record being edited, it does not clash with
/// itself.
pub fn validate_category(
    input: &CategoryInput,
    existing: &[Category],
    editing: Option<i32>,
) -> Result<CategoryFields, FormErrors> {
    let mut errors = FormErrors::default();

    let name = required(&mut errors, "name", &input.name);
    max_length(&mut errors, "name", &name, NAME_MAX_LENGTH);
    let description = input.description.trim().to_string();
    max_length(&mut errors, "description", &description, DESCRIPTION_MAX_LENGTH);

    let taken = existing.iter().any(|category| {
        Some(category.id) != editing && category.name.trim().to_lowercase() == name.to_lowercase()
    });
    if !name.is_empty() && taken {
        errors.add_non_field(DUPLICATE_NAME);
    }

    errors.into_result(CategoryFields { name, description })
}

/// One inline edit form of the category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryForm {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_record(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn existing() -> Vec<Category> {
        vec![Category {
            id: 4,
            name: String::from("Rust"),
            description: String::from("Systems"),
        }]
    }

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_duplicate_name_is_a_form_level_error() {
        let errors = validate_category(&input(" rust "), &existing(), None).unwrap_err();

        assert!(errors.fields.is_empty());
        assert_eq!(errors.non_field, vec![String::from(DUPLICATE_NAME)]);
    }

    #[test]
    fn test_editing_keeps_own_name() {
        let fields = validate_category(&input("Rust"), &existing(), Some(4)).unwrap();

        assert_eq!(fields.name, "Rust");
    }

    #[test]
    fn test_missing_name_is_a_field_error() {
        let errors = validate_category(&input("   "), &existing(), None).unwrap_err();

        assert!(errors.non_field.is_empty());
        assert!(errors.fields.contains_key("name"));
    }

    #[test]
    fn test_description_too_long() {
        let mut submitted = input("Web");
        submitted.description = "d".repeat(DESCRIPTION_MAX_LENGTH + 1);

        let errors = validate_category(&submitted, &existing(), None).unwrap_err();

        assert!(errors.fields.contains_key("description"));
    }
}
