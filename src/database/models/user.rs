use serde::Serialize;

use crate::app::AppError;

#[derive(Debug, Queryable, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    ///SHA256 of the password
    #[serde(skip_serializing)]
    pub pass: String,
    pub is_staff: bool,
}

pub trait UserRepository: Send + Sync {
    /** Returns an user with the id specified */
    fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError>;

    /// Returns the user registered under `username`, if any.
    ///
    /// # Example
    /// ```ignore
    /// match users.find_by_username("alice")? {
    ///     Some(user) => println!("{:?}", user),
    ///     None => println!("No user found"),
    /// }
    /// ```
    fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Pushes a new user in the store. `pass` must already be the password
    /// digest, see [crate::auth::password::hash].
    fn create(&self, username: &str, pass: &str, is_staff: bool) -> Result<User, AppError>;
}
