use std::sync::Arc;

use chrono::Utc;
use diesel::{
    prelude::*,
    r2d2::{ConnectionManager, PooledConnection},
    PgConnection,
};

use super::{
    db_utils::PgPool,
    models::{Blog, BlogRepository, Category, CategoryRepository, User, UserRepository},
};
use crate::{
    app::AppError,
    forms::{blog::BlogFields, category::CategoryFields},
    schema::{blog_categories, blogs, categories, users},
};

type PgPooledConnection = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Insertable)]
#[table_name = "blogs"]
struct BlogInsert<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub author_id: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "categories"]
struct CategoryInsert<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(Insertable)]
#[table_name = "users"]
struct UserInsert<'a> {
    pub username: &'a str,
    pub pass: &'a str,
    pub is_staff: bool,
}

/// Repositories backed by PostgreSQL through the shared r2d2 pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Arc<PgPool>,
}

impl PgStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PgPooledConnection, AppError> {
        Ok(self.pool.get()?)
    }
}

impl BlogRepository for PgStore {
    fn find_all(&self) -> Result<Vec<Blog>, AppError> {
        let conn = self.conn()?;
        Ok(blogs::table
            .order((blogs::created_at.desc(), blogs::id.desc()))
            .load::<Blog>(&conn)?)
    }

    fn find_by_id(&self, blog_id: i32) -> Result<Option<Blog>, AppError> {
        let conn = self.conn()?;
        Ok(blogs::table.find(blog_id).first::<Blog>(&conn).optional()?)
    }

    fn create(&self, author: &User, fields: &BlogFields) -> Result<Blog, AppError> {
        let conn = self.conn()?;
        let time = Utc::now().naive_utc();

        let to_insert = BlogInsert {
            title: &fields.title,
            body: &fields.body,
            author_id: author.id,
            created_at: time,
            updated_at: time,
        };

        Ok(diesel::insert_into(blogs::table)
            .values(&to_insert)
            .get_result(&conn)?)
    }

    fn save(&self, blog: &Blog) -> Result<(), AppError> {
        let conn = self.conn()?;
        let updated = diesel::update(blogs::table.find(blog.id))
            .set((
                blogs::title.eq(&blog.title),
                blogs::body.eq(&blog.body),
                blogs::updated_at.eq(blog.updated_at),
            ))
            .execute(&conn)?;
        if updated == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    fn delete(&self, blog_id: i32) -> Result<bool, AppError> {
        let conn = self.conn()?;
        let removed = conn.transaction::<_, diesel::result::Error, _>(|| {
            diesel::delete(blog_categories::table.filter(blog_categories::blog_id.eq(blog_id)))
                .execute(&conn)?;
            diesel::delete(blogs::table.find(blog_id)).execute(&conn)
        })?;
        Ok(removed > 0)
    }

    fn categories_of(&self, blog_id: i32) -> Result<Vec<i32>, AppError> {
        let conn = self.conn()?;
        Ok(blog_categories::table
            .filter(blog_categories::blog_id.eq(blog_id))
            .select(blog_categories::category_id)
            .order(blog_categories::category_id.asc())
            .load::<i32>(&conn)?)
    }

    fn set_categories(&self, blog_id: i32, category_ids: &[i32]) -> Result<(), AppError> {
        let conn = self.conn()?;
        let rows = category_ids
            .iter()
            .map(|category| {
                (
                    blog_categories::blog_id.eq(blog_id),
                    blog_categories::category_id.eq(*category),
                )
            })
            .collect::<Vec<_>>();

        conn.transaction::<_, diesel::result::Error, _>(|| {
            diesel::delete(blog_categories::table.filter(blog_categories::blog_id.eq(blog_id)))
                .execute(&conn)?;
            if !rows.is_empty() {
                diesel::insert_into(blog_categories::table)
                    .values(rows)
                    .execute(&conn)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}

impl CategoryRepository for PgStore {
    fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let conn = self.conn()?;
        Ok(categories::table
            .order((categories::name.asc(), categories::id.asc()))
            .load::<Category>(&conn)?)
    }

    fn find_by_id(&self, category_id: i32) -> Result<Option<Category>, AppError> {
        let conn = self.conn()?;
        Ok(categories::table
            .find(category_id)
            .first::<Category>(&conn)
            .optional()?)
    }

    fn create(&self, fields: &CategoryFields) -> Result<Category, AppError> {
        let conn = self.conn()?;
        let to_insert = CategoryInsert {
            name: &fields.name,
            description: &fields.description,
        };

        Ok(diesel::insert_into(categories::table)
            .values(&to_insert)
            .get_result(&conn)?)
    }

    fn save(&self, category: &Category) -> Result<(), AppError> {
        let conn = self.conn()?;
        let updated = diesel::update(categories::table.find(category.id))
            .set((
                categories::name.eq(&category.name),
                categories::description.eq(&category.description),
            ))
            .execute(&conn)?;
        if updated == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    fn delete(&self, category_id: i32) -> Result<bool, AppError> {
        let conn = self.conn()?;
        let removed = conn.transaction::<_, diesel::result::Error, _>(|| {
            diesel::delete(
                blog_categories::table.filter(blog_categories::category_id.eq(category_id)),
            )
            .execute(&conn)?;
            diesel::delete(categories::table.find(category_id)).execute(&conn)
        })?;
        Ok(removed > 0)
    }
}

impl UserRepository for PgStore {
    fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let conn = self.conn()?;
        Ok(users::table.find(user_id).first::<User>(&conn).optional()?)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let conn = self.conn()?;
        Ok(users::table
            .filter(users::username.eq(username))
            .first::<User>(&conn)
            .optional()?)
    }

    fn create(&self, username: &str, pass: &str, is_staff: bool) -> Result<User, AppError> {
        let conn = self.conn()?;
        let to_insert = UserInsert {
            username,
            pass,
            is_staff,
        };

        Ok(diesel::insert_into(users::table)
            .values(&to_insert)
            .get_result(&conn)?)
    }
}
