pub mod blog;
pub mod category;
pub mod user;

pub use blog::{Blog, BlogRepository};
pub use category::{Category, CategoryRepository};
pub use user::{User, UserRepository};
