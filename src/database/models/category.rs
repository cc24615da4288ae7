use serde::Serialize;

use crate::{app::AppError, forms::category::CategoryFields};

#[derive(Debug, Queryable, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn apply(&mut self, fields: &CategoryFields) {
        self.name = fields.name.clone();
        self.description = fields.description.clone();
    }
}

pub trait CategoryRepository: Send + Sync {
    /// Every category ordered by name.
    fn find_all(&self) -> Result<Vec<Category>, AppError>;
    fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, AppError>;
    fn create(&self, fields: &CategoryFields) -> Result<Category, AppError>;
    fn save(&self, category: &Category) -> Result<(), AppError>;
    /** Removes the category and unlinks it from every blog, the blogs stay */
    fn delete(&self, category_id: i32) -> Result<bool, AppError>;
}
