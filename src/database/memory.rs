use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Mutex, MutexGuard},
};

use chrono::Utc;

use super::models::{Blog, BlogRepository, Category, CategoryRepository, User, UserRepository};
use crate::{
    app::AppError,
    forms::{blog::BlogFields, category::CategoryFields},
};

#[derive(Default)]
struct Tables {
    blogs: BTreeMap<i32, Blog>,
    blog_categories: BTreeSet<(i32, i32)>,
    categories: BTreeMap<i32, Category>,
    users: BTreeMap<i32, User>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// Repositories kept in process memory, used by the handler tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

/// Same check as the `LOWER(name)` unique index.
fn name_taken(tables: &Tables, name: &str, except: Option<i32>) -> bool {
    tables.categories.values().any(|category| {
        Some(category.id) != except && category.name.to_lowercase() == name.to_lowercase()
    })
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::InternalServerError)
    }
}

impl BlogRepository for MemoryStore {
    fn find_all(&self) -> Result<Vec<Blog>, AppError> {
        let tables = self.lock()?;
        let mut all = tables.blogs.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(all)
    }

    fn find_by_id(&self, blog_id: i32) -> Result<Option<Blog>, AppError> {
        Ok(self.lock()?.blogs.get(&blog_id).cloned())
    }

    fn create(&self, author: &User, fields: &BlogFields) -> Result<Blog, AppError> {
        let mut tables = self.lock()?;
        let time = Utc::now().naive_utc();
        let blog = Blog {
            id: tables.next_id(),
            title: fields.title.clone(),
            body: fields.body.clone(),
            author_id: author.id,
            created_at: time,
            updated_at: time,
        };
        tables.blogs.insert(blog.id, blog.clone());
        Ok(blog)
    }

    fn save(&self, blog: &Blog) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let stored = tables.blogs.get_mut(&blog.id).ok_or(AppError::NotFound)?;
        stored.title = blog.title.clone();
        stored.body = blog.body.clone();
        stored.updated_at = blog.updated_at;
        Ok(())
    }

    fn delete(&self, blog_id: i32) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        tables.blog_categories.retain(|(blog, _)| *blog != blog_id);
        Ok(tables.blogs.remove(&blog_id).is_some())
    }

    fn categories_of(&self, blog_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(self
            .lock()?
            .blog_categories
            .iter()
            .filter(|(blog, _)| *blog == blog_id)
            .map(|(_, category)| *category)
            .collect())
    }

    fn set_categories(&self, blog_id: i32, category_ids: &[i32]) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        tables.blog_categories.retain(|(blog, _)| *blog != blog_id);
        for category in category_ids {
            tables.blog_categories.insert((blog_id, *category));
        }
        Ok(())
    }
}

impl CategoryRepository for MemoryStore {
    fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let tables = self.lock()?;
        let mut all = tables.categories.values().cloned().collect::<Vec<_>>();
        all.sort_by(|a, b| (&a.name, a.id).cmp(&(&b.name, b.id)));
        Ok(all)
    }

    fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, AppError> {
        Ok(self.lock()?.categories.get(&category_id).cloned())
    }

    fn create(&self, fields: &CategoryFields) -> Result<Category, AppError> {
        let mut tables = self.lock()?;
        if name_taken(&tables, &fields.name, None) {
            return Err(AppError::BadRequest);
        }
        let category = Category {
            id: tables.next_id(),
            name: fields.name.clone(),
            description: fields.description.clone(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn save(&self, category: &Category) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        if name_taken(&tables, &category.name, Some(category.id)) {
            return Err(AppError::BadRequest);
        }
        let stored = tables
            .categories
            .get_mut(&category.id)
            .ok_or(AppError::NotFound)?;
        *stored = category.clone();
        Ok(())
    }

    fn delete(&self, category_id: i32) -> Result<bool, AppError> {
        let mut tables = self.lock()?;
        tables
            .blog_categories
            .retain(|(_, category)| *category != category_id);
        Ok(tables.categories.remove(&category_id).is_some())
    }
}

impl UserRepository for MemoryStore {
    fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.get(&user_id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn create(&self, username: &str, pass: &str, is_staff: bool) -> Result<User, AppError> {
        let mut tables = self.lock()?;
        if tables.users.values().any(|user| user.username == username) {
            return Err(AppError::BadRequest);
        }
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            pass: pass.to_string(),
            is_staff,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(title: &str) -> BlogFields {
        BlogFields {
            title: title.to_string(),
            body: String::from("Test body"),
            categories: Vec::new(),
        }
    }

    fn category(name: &str) -> CategoryFields {
        CategoryFields {
            name: name.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_deleting_a_category_keeps_its_blogs() {
        let store = MemoryStore::default();
        let author = UserRepository::create(&store, "Test_user123", "digest", false).unwrap();
        let category = CategoryRepository::create(
            &store,
            &CategoryFields {
                name: String::from("Rust"),
                description: String::new(),
            },
        )
        .unwrap();
        let blog = BlogRepository::create(&store, &author, &fields("Test title")).unwrap();
        store.set_categories(blog.id, &[category.id]).unwrap();

        assert!(CategoryRepository::delete(&store, category.id).unwrap());

        assert_eq!(store.categories_of(blog.id).unwrap(), Vec::<i32>::new());
        assert!(BlogRepository::find_by_id(&store, blog.id).unwrap().is_some());
    }

    #[test]
    fn test_set_categories_replaces_previous_links() {
        let store = MemoryStore::default();
        let author = UserRepository::create(&store, "Test_user123", "digest", false).unwrap();
        let blog = BlogRepository::create(&store, &author, &fields("Test title")).unwrap();

        store.set_categories(blog.id, &[3, 1]).unwrap();
        store.set_categories(blog.id, &[2]).unwrap();

        assert_eq!(store.categories_of(blog.id).unwrap(), vec![2]);
    }

    #[test]
    fn test_category_names_are_unique_ignoring_case() {
        let store = MemoryStore::default();
        let rust = CategoryRepository::create(&store, &category("Rust")).unwrap();
        let web = CategoryRepository::create(&store, &category("Web")).unwrap();

        assert_eq!(
            CategoryRepository::create(&store, &category("rust")),
            Err(AppError::BadRequest)
        );

        let renamed = Category {
            name: String::from("RUST"),
            ..web
        };
        assert_eq!(
            CategoryRepository::save(&store, &renamed),
            Err(AppError::BadRequest)
        );
        // renaming to its own name in another case is fine
        let recased = Category {
            name: String::from("RUST"),
            ..rust
        };
        assert_eq!(CategoryRepository::save(&store, &recased), Ok(()));
    }

    #[test]
    fn test_save_of_missing_row_is_not_found() {
        let store = MemoryStore::default();
        let author = UserRepository::create(&store, "Test_user123", "digest", false).unwrap();
        let blog = BlogRepository::create(&store, &author, &fields("Test title")).unwrap();
        assert!(BlogRepository::delete(&store, blog.id).unwrap());

        assert_eq!(BlogRepository::save(&store, &blog), Err(AppError::NotFound));
        assert_eq!(
            CategoryRepository::save(
                &store,
                &Category {
                    id: 999,
                    name: String::from("Rust"),
                    description: String::new(),
                }
            ),
            Err(AppError::NotFound)
        );
    }

    #[test]
    fn test_delete_reports_missing_rows() {
        let store = MemoryStore::default();
        assert!(!BlogRepository::delete(&store, 999).unwrap());
        assert!(!CategoryRepository::delete(&store, 999).unwrap());
    }
}
