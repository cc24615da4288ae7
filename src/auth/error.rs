use std::fmt::Display;

use crate::app::AppError;

/// Why a login attempt was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. Both read the same to the user.
    WrongCredentials,
    /// The user store could not be asked.
    Store(AppError),
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Store(err)
    }
}

impl Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::WrongCredentials => {
                f.write_str("Please enter a correct username and password.")
            }
            AuthError::Store(err) => write!(f, "Could not check credentials: {}", err),
        }
    }
}

impl std::error::Error for AuthError {}
