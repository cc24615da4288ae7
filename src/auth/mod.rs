pub mod error;
pub mod flash;
pub mod password;
pub mod policy;
pub mod requester;

use self::error::AuthError;
use crate::{
    database::models::{User, UserRepository},
    forms::login::Credentials,
};

/// Session key holding the id of the logged in user.
pub const SESSION_USER_ID: &str = "user_id";

/// Checks the credentials against the user store.
pub fn authenticate(users: &dyn UserRepository, credentials: &Credentials) -> Result<User, AuthError> {
    let user = users
        .find_by_username(&credentials.username)?
        .ok_or(AuthError::WrongCredentials)?;

    if !password::verify(&credentials.password, &user.pass) {
        return Err(AuthError::WrongCredentials);
    }

    Ok(user)
}
