use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::{app::AppError, forms::blog::BlogFields};

use super::user::User;

#[derive(Debug, PartialEq, Eq)]
#[derive(Queryable)]
#[derive(Clone)]
#[derive(Serialize)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Blog {
    pub fn is_written_by(&self, user: &User) -> bool {
        self.author_id == user.id
    }

    /** Copies validated form fields onto the record and bumps `updated_at`.
     * Categories are not part of the row, they are saved through
     * [BlogRepository::set_categories].
     */
    pub fn apply(&mut self, fields: &BlogFields) {
        self.title = fields.title.clone();
        self.body = fields.body.clone();
        self.updated_at = Utc::now().naive_utc();
    }
}

/// Storage for blogs and their category relation.
///
/// Lookups that can miss return `Ok(None)`, deletions report whether a row was
/// removed. `Err` is only used for store failures.
pub trait BlogRepository: Send + Sync {
    /// Every blog, newest first.
    fn find_all(&self) -> Result<Vec<Blog>, AppError>;
    fn find_by_id(&self, blog_id: i32) -> Result<Option<Blog>, AppError>;
    /// Inserts a new blog owned by `author`. The category relation is left
    /// empty.
    fn create(&self, author: &User, fields: &BlogFields) -> Result<Blog, AppError>;
    /// Writes title, body and `updated_at` of an existing blog.
    fn save(&self, blog: &Blog) -> Result<(), AppError>;
    /// Removes the blog together with its category links.
    fn delete(&self, blog_id: i32) -> Result<bool, AppError>;
    /// Category ids linked to the blog, ascending.
    fn categories_of(&self, blog_id: i32) -> Result<Vec<i32>, AppError>;
    /// Replaces the category links of the blog.
    fn set_categories(&self, blog_id: i32, category_ids: &[i32]) -> Result<(), AppError>;
}
