use serde::{Deserialize, Serialize};

use super::{required, FormErrors};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct LoginInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub fn validate_login(input: &LoginInput) -> Result<Credentials, FormErrors> {
    let mut errors = FormErrors::default();

    let username = required(&mut errors, "username", &input.username);
    if input.password.is_empty() {
        errors.add_field("password", super::REQUIRED);
    }

    errors.into_result(Credentials {
        username,
        password: input.password.clone(),
    })
}

/// The login form never echoes the password back.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn bound(input: &LoginInput, errors: FormErrors) -> Self {
        Self {
            username: input.username.clone(),
            errors,
        }
    }
}
